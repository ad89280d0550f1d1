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
use stellar_xdr::curr::{
    Hash, HashIdPreimage, HashIdPreimageSorobanAuthorization, Limits, SorobanAuthorizedInvocation,
    WriteXdr,
};

/// Computes the signature payload hash for a Soroban authorization entry.
///
/// The preimage is the protocol's `ENVELOPE_TYPE_SOROBAN_AUTHORIZATION`
/// [`HashIdPreimage`] over the network id, nonce, signature expiration
/// ledger, and root invocation, serialized with canonical XDR. This is the
/// exact value a smart account's `__check_auth` recomputes on chain, so the
/// encoding must come from the protocol types and never be hand-rolled.
pub fn authorization_payload_hash(
    network_id: &Hash,
    nonce: i64,
    signature_expiration_ledger: u32,
    invocation: &SorobanAuthorizedInvocation,
) -> Result<[u8; 32], stellar_xdr::curr::Error> {
    let preimage = HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
        network_id: network_id.clone(),
        nonce,
        signature_expiration_ledger,
        invocation: invocation.clone(),
    });
    let bytes = preimage.to_xdr(Limits::none())?;
    Ok(Sha256::digest(&bytes).into())
}

#[cfg(test)]
mod tests {
    use stellar_xdr::curr::{
        ContractId, InvokeContractArgs, ScAddress, ScSymbol, ScVal, SorobanAuthorizedFunction,
        StringM,
    };

    use super::*;

    fn invocation(function_name: &str) -> SorobanAuthorizedInvocation {
        SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract(ContractId(Hash([7; 32]))),
                function_name: ScSymbol(StringM::try_from(function_name).unwrap()),
                args: vec![ScVal::U32(1)].try_into().unwrap(),
            }),
            sub_invocations: Default::default(),
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let network_id = Hash([1; 32]);
        let inv = invocation("transfer");
        let a = authorization_payload_hash(&network_id, 42, 1_000, &inv).unwrap();
        let b = authorization_payload_hash(&network_id, 42, 1_000, &inv).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_changes_with_each_input() {
        let network_id = Hash([1; 32]);
        let inv = invocation("transfer");
        let base = authorization_payload_hash(&network_id, 42, 1_000, &inv).unwrap();

        let other_network = authorization_payload_hash(&Hash([2; 32]), 42, 1_000, &inv).unwrap();
        let other_nonce = authorization_payload_hash(&network_id, 43, 1_000, &inv).unwrap();
        let other_expiration = authorization_payload_hash(&network_id, 42, 1_001, &inv).unwrap();
        let other_invocation =
            authorization_payload_hash(&network_id, 42, 1_000, &invocation("burn")).unwrap();

        assert_ne!(base, other_network);
        assert_ne!(base, other_nonce);
        assert_ne!(base, other_expiration);
        assert_ne!(base, other_invocation);
    }
}
