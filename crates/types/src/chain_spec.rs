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

use sha2::{Digest, Sha256};
use stellar_xdr::curr::Hash;

/// Network passphrase of the Stellar public network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Network passphrase of the SDF testnet.
pub const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Chain specification.
///
/// The passphrase uniquely identifies a Stellar network; its SHA-256 digest
/// is the network id that seeds every signature payload hash, so entries
/// signed for one network never verify on another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainSpec {
    /// The network passphrase.
    pub network_passphrase: String,
}

impl ChainSpec {
    /// Creates a chain spec for the given network passphrase.
    pub fn new(network_passphrase: impl Into<String>) -> Self {
        Self {
            network_passphrase: network_passphrase.into(),
        }
    }

    /// The network id: SHA-256 of the passphrase bytes.
    pub fn network_id(&self) -> Hash {
        Hash(Sha256::digest(self.network_passphrase.as_bytes()).into())
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for ChainSpec {
    fn default() -> Self {
        Self::new(TESTNET_NETWORK_PASSPHRASE)
    }
}
