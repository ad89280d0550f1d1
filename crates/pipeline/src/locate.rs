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

use stellar_xdr::curr::{ScAddress, SorobanAuthorizationEntry, SorobanCredentials};

/// Returns the index of the first entry addressed to the smart account.
///
/// Entries with other credential kinds, or addressed elsewhere, are skipped
/// without aborting the scan; unrelated third-party entries legitimately
/// appear in the same list. A companion entry appended by a previous run is
/// addressed to the delegated signer's account, so it never matches here.
pub fn find_smart_account_entry(
    entries: &[SorobanAuthorizationEntry],
    smart_account: &ScAddress,
) -> Option<usize> {
    entries.iter().position(|entry| match &entry.credentials {
        SorobanCredentials::Address(credentials) => credentials.address == *smart_account,
        _ => false,
    })
}
