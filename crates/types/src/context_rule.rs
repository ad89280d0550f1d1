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

//! Storage shapes of a smart account's context rules.
//!
//! A context rule binds a context kind to the signers and policies allowed
//! to act in it. The smart account keeps rules in persistent contract data;
//! the encodings below mirror the contract's storage enums so the pipeline
//! can name the exact ledger entries `__check_auth` will read.

use stellar_xdr::curr::{Error, ScAddress, ScBytes, ScSymbol, ScVal, ScVec, StringM};

fn symbol(s: &str) -> Result<ScVal, Error> {
    Ok(ScVal::Symbol(ScSymbol(StringM::try_from(s)?)))
}

fn tagged(elements: Vec<ScVal>) -> Result<ScVal, Error> {
    Ok(ScVal::Vec(Some(ScVec(elements.try_into()?))))
}

/// The context kind a rule applies to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContextRuleType {
    /// Fallback rule matching any context without a more specific rule.
    Default,
    /// Rule scoped to calls into one contract.
    CallContract(ScAddress),
    /// Rule scoped to deployments of one wasm hash.
    CreateContract(ScBytes),
}

impl ContextRuleType {
    /// The contract storage encoding of this context kind.
    pub fn to_scval(&self) -> Result<ScVal, Error> {
        match self {
            Self::Default => tagged(vec![symbol("Default")?]),
            Self::CallContract(address) => tagged(vec![
                symbol("CallContract")?,
                ScVal::Address(address.clone()),
            ]),
            Self::CreateContract(wasm_hash) => tagged(vec![
                symbol("CreateContract")?,
                ScVal::Bytes(wasm_hash.clone()),
            ]),
        }
    }
}

/// A smart account's persistent storage keys.
///
/// One context rule is spread over three records (metadata, signer list,
/// policy list) keyed by rule id, plus a per-context-kind index of rule ids.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SmartAccountDataKey {
    /// Index of rule ids registered for a context kind.
    ContextRuleIds(ContextRuleType),
    /// Name and validity metadata of one rule.
    ContextRuleMeta(u32),
    /// Signers permitted by one rule.
    ContextRuleSigners(u32),
    /// Policies attached to one rule.
    ContextRulePolicies(u32),
}

impl SmartAccountDataKey {
    /// The contract storage encoding of this key.
    pub fn to_scval(&self) -> Result<ScVal, Error> {
        match self {
            Self::ContextRuleIds(context_type) => {
                tagged(vec![symbol("ContextRuleIds")?, context_type.to_scval()?])
            }
            Self::ContextRuleMeta(id) => tagged(vec![symbol("ContextRuleMeta")?, ScVal::U32(*id)]),
            Self::ContextRuleSigners(id) => {
                tagged(vec![symbol("ContextRuleSigners")?, ScVal::U32(*id)])
            }
            Self::ContextRulePolicies(id) => {
                tagged(vec![symbol("ContextRulePolicies")?, ScVal::U32(*id)])
            }
        }
    }
}
