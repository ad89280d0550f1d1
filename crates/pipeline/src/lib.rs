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

//! Delegated-signer augmentation of simulated Soroban transactions.
//!
//! Given a simulation response for a transaction that invokes a smart
//! account, [`DelegatedAuthorizer`] rewrites the smart account's
//! authorization entry with a placeholder signature, appends a companion
//! entry signed by a delegated key that proves itself through the account's
//! `__check_auth` entry point, widens the declared footprint to cover the
//! verification work, and recomputes the resource budget and fee.
//!
//! Includes:
//!
//! - Authorization entry lookup by smart-account address
//! - `__check_auth` invocation construction
//! - Footprint expansion with set semantics
//! - Checked resource and fee recalculation

mod error;
pub use error::DelegatedAuthError;

mod footprint;
pub use footprint::{expand_footprint, smart_account_ledger_keys};

mod invocation;
pub use invocation::check_auth_invocation;

mod locate;
pub use locate::find_smart_account_entry;

mod pipeline;
pub use pipeline::{DelegatedAuthorizer, Settings, SIGNATURE_EXPIRATION_LEDGERS};

mod resources;
pub use resources::{recompute_resources, ResourceError};
