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

//! Signing oracle for delegated authorization entries.
//!
//! The pipeline treats signing as an opaque asynchronous capability behind
//! [`AuthorizationSigner`]: hand it an unsigned companion entry, get back
//! the same entry with its credentials signed for a network and expiration.
//! [`LocalSigner`] is the in-process ed25519 implementation; remote or
//! hardware-backed signers implement the same trait.
//!
//! ## Feature Flags
//!
//! - `test-utils`: Export a mock signer for testing.

#[cfg(feature = "test-utils")]
use mockall::automock;
use sorauth_types::DelegatedSignerKey;
use stellar_xdr::curr::{Hash, SorobanAuthorizationEntry};

mod error;
pub use error::{Error, Result};

mod local;
pub use local::LocalSigner;

/// An asynchronous signing capability for Soroban authorization entries.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait AuthorizationSigner: Send + Sync {
    /// The signer's public identity.
    fn signer_key(&self) -> DelegatedSignerKey;

    /// Signs the entry's authorization payload for the given network and
    /// expiration ledger, returning the entry with filled credentials.
    ///
    /// May suspend on network or hardware latency, and may fail; a failure
    /// aborts the caller's whole transformation.
    async fn sign_authorization_entry(
        &self,
        entry: SorobanAuthorizationEntry,
        signature_expiration_ledger: u32,
        network_id: Hash,
    ) -> Result<SorobanAuthorizationEntry>;
}
