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

use stellar_xdr::curr::{
    AccountId, BytesM, ContractDataDurability, Error, LedgerKey, LedgerKeyAccount,
    LedgerKeyContractData, PublicKey, ScAddress, ScBytes, ScMap, ScMapEntry, ScNonceKey, ScSymbol,
    ScVal, ScVec, StringM, Uint256,
};

/// The identity of a delegated signer: an ed25519 public key registered with
/// a smart account as a `Delegated` signer.
///
/// The smart account's primary entry carries only a placeholder for this
/// signer; the real signature rides on a companion entry addressed to the
/// signer's own account, which proves the key through a `__check_auth`
/// sub-call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DelegatedSignerKey {
    public_key: [u8; 32],
}

impl DelegatedSignerKey {
    /// Creates a signer key from raw ed25519 public key bytes.
    pub fn new(public_key: [u8; 32]) -> Self {
        Self { public_key }
    }

    /// The raw public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    /// The signer's classic account id.
    pub fn account_id(&self) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(self.public_key)))
    }

    /// The signer's address form, as stored by the smart account.
    pub fn address(&self) -> ScAddress {
        ScAddress::Account(self.account_id())
    }

    /// Ledger key of the signer's account record.
    pub fn account_ledger_key(&self) -> LedgerKey {
        LedgerKey::Account(LedgerKeyAccount {
            account_id: self.account_id(),
        })
    }

    /// Ledger key of the signer's replay-protection nonce for one entry.
    ///
    /// Nonces for address credentials live as temporary contract data under
    /// the authorizing address itself, keyed by the nonce value.
    pub fn nonce_ledger_key(&self, nonce: i64) -> LedgerKey {
        LedgerKey::ContractData(LedgerKeyContractData {
            contract: self.address(),
            key: ScVal::LedgerKeyNonce(ScNonceKey { nonce }),
            durability: ContractDataDurability::Temporary,
        })
    }

    /// The signer-key descriptor in the smart account's storage encoding:
    /// the `Delegated` signer kind tagged with the address form of the key.
    pub fn to_scval(&self) -> Result<ScVal, Error> {
        let tag = ScVal::Symbol(ScSymbol(StringM::try_from("Delegated")?));
        Ok(ScVal::Vec(Some(ScVec(
            vec![tag, ScVal::Address(self.address())].try_into()?,
        ))))
    }

    /// The placeholder `Signatures` value stamped on the primary entry: a
    /// single-entry map from this signer's descriptor to an empty byte blob,
    /// wrapped in the one-field struct encoding.
    ///
    /// The blob stays empty for delegated signers; verification consumes the
    /// companion entry instead.
    pub fn placeholder_signatures(&self) -> Result<ScVal, Error> {
        let entry = ScMapEntry {
            key: self.to_scval()?,
            val: ScVal::Bytes(ScBytes(BytesM::default())),
        };
        let map = ScVal::Map(Some(ScMap(vec![entry].try_into()?)));
        Ok(ScVal::Vec(Some(ScVec(vec![map].try_into()?))))
    }
}
