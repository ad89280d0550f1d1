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

use sorauth_types::{ContextRuleType, SmartAccountDataKey};
use stellar_xdr::curr::{
    ContractDataDurability, Error, LedgerFootprint, LedgerKey, LedgerKeyContractData, ScAddress,
    ScVal, VecM,
};

/// Merges extra keys into one side of a footprint. Existing keys are never
/// removed; extras already present collapse by key equality, and insertion
/// order is preserved for the wire encoding.
fn union(existing: &VecM<LedgerKey>, extra: Vec<LedgerKey>) -> Result<VecM<LedgerKey>, Error> {
    let mut keys = existing.to_vec();
    for key in extra {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.try_into()
}

/// Returns a footprint widened by the given read-only and read-write keys.
pub fn expand_footprint(
    current: &LedgerFootprint,
    extra_read_only: Vec<LedgerKey>,
    extra_read_write: Vec<LedgerKey>,
) -> Result<LedgerFootprint, Error> {
    Ok(LedgerFootprint {
        read_only: union(&current.read_only, extra_read_only)?,
        read_write: union(&current.read_write, extra_read_write)?,
    })
}

fn contract_data_key(contract: &ScAddress, key: ScVal) -> LedgerKey {
    LedgerKey::ContractData(LedgerKeyContractData {
        contract: contract.clone(),
        key,
        durability: ContractDataDurability::Persistent,
    })
}

/// The smart-account records `__check_auth` reads while validating a
/// delegated signer: the contract instance plus the context rule's id index,
/// metadata, signer list, and policy list. All persistent, all read-only.
pub fn smart_account_ledger_keys(
    smart_account: &ScAddress,
    context_type: &ContextRuleType,
    rule_id: u32,
) -> Result<Vec<LedgerKey>, Error> {
    Ok(vec![
        contract_data_key(smart_account, ScVal::LedgerKeyContractInstance),
        contract_data_key(
            smart_account,
            SmartAccountDataKey::ContextRuleIds(context_type.clone()).to_scval()?,
        ),
        contract_data_key(
            smart_account,
            SmartAccountDataKey::ContextRuleMeta(rule_id).to_scval()?,
        ),
        contract_data_key(
            smart_account,
            SmartAccountDataKey::ContextRuleSigners(rule_id).to_scval()?,
        ),
        contract_data_key(
            smart_account,
            SmartAccountDataKey::ContextRulePolicies(rule_id).to_scval()?,
        ),
    ])
}
