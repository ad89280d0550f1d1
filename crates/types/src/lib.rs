// This file is part of Sorauth.
//
// Sorauth is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Sorauth is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Sorauth.
// If not, see https://www.gnu.org/licenses/.

#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Common types for Soroban smart-account authorization augmentation.
//!
//! All wire-facing shapes are the Stellar protocol's own XDR types from the
//! [`stellar_xdr`] crate; this crate layers the pure computations that must
//! agree byte-for-byte with what a smart account recomputes on chain.

mod auth;
pub use auth::authorization_payload_hash;

mod chain_spec;
pub use chain_spec::{ChainSpec, PUBLIC_NETWORK_PASSPHRASE, TESTNET_NETWORK_PASSPHRASE};

mod context_rule;
pub use context_rule::{ContextRuleType, SmartAccountDataKey};

mod signer_key;
pub use signer_key::DelegatedSignerKey;

mod simulation;
pub use simulation::SimulationResponse;
