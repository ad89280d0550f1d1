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
    BytesM, Error, InvokeContractArgs, ScAddress, ScBytes, ScSymbol, ScVal,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, StringM,
};

/// Name of the entry point Soroban invokes to validate custom account
/// authorization.
const CHECK_AUTH_FN: &str = "__check_auth";

/// Builds the invocation the companion entry authorizes: a single call to
/// the smart account's `__check_auth` carrying the signature payload hash as
/// its sole argument, with no sub-invocations.
pub fn check_auth_invocation(
    smart_account: &ScAddress,
    payload_hash: [u8; 32],
) -> Result<SorobanAuthorizedInvocation, Error> {
    let args = vec![ScVal::Bytes(ScBytes(BytesM::try_from(
        payload_hash.to_vec(),
    )?))];
    Ok(SorobanAuthorizedInvocation {
        function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
            contract_address: smart_account.clone(),
            function_name: ScSymbol(StringM::try_from(CHECK_AUTH_FN)?),
            args: args.try_into()?,
        }),
        sub_invocations: Default::default(),
    })
}
