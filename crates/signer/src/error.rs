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

/// Error type for the signer crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entry to sign does not carry address credentials
    #[error("entry to sign must carry address credentials")]
    NotAddressCredentials,
    /// Signing error
    #[error("signing error: {0}")]
    SigningError(String),
    /// XDR encoding error
    #[error("xdr encoding error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
    /// Other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for the signer crate
pub type Result<T> = std::result::Result<T, Error>;
