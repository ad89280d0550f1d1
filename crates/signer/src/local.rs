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

use ed25519_dalek::{Signer as _, SigningKey};
use sorauth_types::{authorization_payload_hash, DelegatedSignerKey};
use stellar_xdr::curr::{
    BytesM, Error as XdrError, Hash, ScBytes, ScMap, ScMapEntry, ScSymbol, ScVal, ScVec,
    SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanCredentials, StringM,
};
use tracing::instrument;

use crate::{AuthorizationSigner, Error, Result};

/// In-process ed25519 signer holding a raw signing key.
pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    /// Creates a signer from raw ed25519 secret key bytes.
    pub fn new(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }
}

/// The classic account signature shape the host verifies natively: a vec of
/// per-key maps with `public_key` and `signature` entries. Map keys must be
/// in sorted order.
fn account_signature_scval(
    public_key: &[u8; 32],
    signature: &[u8; 64],
) -> std::result::Result<ScVal, XdrError> {
    let entries = vec![
        ScMapEntry {
            key: ScVal::Symbol(ScSymbol(StringM::try_from("public_key")?)),
            val: ScVal::Bytes(ScBytes(BytesM::try_from(public_key.to_vec())?)),
        },
        ScMapEntry {
            key: ScVal::Symbol(ScSymbol(StringM::try_from("signature")?)),
            val: ScVal::Bytes(ScBytes(BytesM::try_from(signature.to_vec())?)),
        },
    ];
    let map = ScVal::Map(Some(ScMap(entries.try_into()?)));
    Ok(ScVal::Vec(Some(ScVec(vec![map].try_into()?))))
}

#[async_trait::async_trait]
impl AuthorizationSigner for LocalSigner {
    fn signer_key(&self) -> DelegatedSignerKey {
        DelegatedSignerKey::new(self.signing_key.verifying_key().to_bytes())
    }

    #[instrument(skip_all)]
    async fn sign_authorization_entry(
        &self,
        entry: SorobanAuthorizationEntry,
        signature_expiration_ledger: u32,
        network_id: Hash,
    ) -> Result<SorobanAuthorizationEntry> {
        let SorobanCredentials::Address(credentials) = entry.credentials else {
            return Err(Error::NotAddressCredentials);
        };

        let payload = authorization_payload_hash(
            &network_id,
            credentials.nonce,
            signature_expiration_ledger,
            &entry.root_invocation,
        )?;
        let signature = self.signing_key.sign(&payload);
        let signature_value = account_signature_scval(
            &self.signing_key.verifying_key().to_bytes(),
            &signature.to_bytes(),
        )?;

        Ok(SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                signature_expiration_ledger,
                signature: signature_value,
                ..credentials
            }),
            root_invocation: entry.root_invocation,
        })
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};
    use stellar_xdr::curr::{
        ContractId, InvokeContractArgs, ScAddress, SorobanAuthorizedFunction,
        SorobanAuthorizedInvocation,
    };

    use super::*;

    const SECRET: [u8; 32] = [11; 32];

    fn unsigned_entry(signer: &LocalSigner, nonce: i64) -> SorobanAuthorizationEntry {
        SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: signer.signer_key().address(),
                nonce,
                signature_expiration_ledger: 0,
                signature: ScVal::Void,
            }),
            root_invocation: SorobanAuthorizedInvocation {
                function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                    contract_address: ScAddress::Contract(ContractId(Hash([5; 32]))),
                    function_name: ScSymbol(StringM::try_from("__check_auth").unwrap()),
                    args: vec![ScVal::Bytes(ScBytes(
                        BytesM::try_from(vec![0xab; 32]).unwrap(),
                    ))]
                    .try_into()
                    .unwrap(),
                }),
                sub_invocations: Default::default(),
            },
        }
    }

    #[tokio::test]
    async fn signs_the_payload_hash_of_the_entry() {
        let signer = LocalSigner::new(&SECRET);
        let network_id = Hash([1; 32]);
        let entry = unsigned_entry(&signer, 99);

        let signed = signer
            .sign_authorization_entry(entry.clone(), 1_100, network_id.clone())
            .await
            .unwrap();

        let SorobanCredentials::Address(credentials) = &signed.credentials else {
            panic!("expected address credentials");
        };
        assert_eq!(credentials.nonce, 99);
        assert_eq!(credentials.signature_expiration_ledger, 1_100);
        assert_eq!(signed.root_invocation, entry.root_invocation);

        // Extract signature bytes and verify against the payload hash.
        let ScVal::Vec(Some(ScVec(maps))) = &credentials.signature else {
            panic!("expected signature vec");
        };
        let maps = maps.to_vec();
        let ScVal::Map(Some(ScMap(entries))) = &maps[0] else {
            panic!("expected signature map");
        };
        let entries = entries.to_vec();
        let ScVal::Bytes(ScBytes(sig_bytes)) = &entries[1].val else {
            panic!("expected signature bytes");
        };
        let payload =
            authorization_payload_hash(&network_id, 99, 1_100, &signed.root_invocation).unwrap();
        let verifying = VerifyingKey::from_bytes(&signer.signer_key().public_key()).unwrap();
        let signature = Signature::from_slice(sig_bytes.as_slice()).unwrap();
        verifying.verify(&payload, &signature).unwrap();
    }

    #[tokio::test]
    async fn rejects_source_account_credentials() {
        let signer = LocalSigner::new(&SECRET);
        let mut entry = unsigned_entry(&signer, 1);
        entry.credentials = SorobanCredentials::SourceAccount;

        let err = signer
            .sign_authorization_entry(entry, 1_100, Hash([1; 32]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotAddressCredentials));
    }
}
