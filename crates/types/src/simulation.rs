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
    LedgerFootprint, SorobanAuthorizationEntry, SorobanResources, SorobanTransactionData,
};

/// The output of simulating a host function invocation, as handed over by
/// the simulation layer and consumed exactly once per augmentation.
///
/// Entry order is significant: the position of the smart account's entry is
/// preserved across augmentation and the companion entry is appended last.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationResponse {
    /// Authorization entries the transaction must satisfy, in order.
    pub auth_entries: Vec<SorobanAuthorizationEntry>,
    /// The transaction's declared footprint, resources, and resource fee.
    pub transaction_data: SorobanTransactionData,
    /// The minimum resource fee the network will accept.
    pub min_resource_fee: i64,
    /// Latest ledger sequence known at simulation time.
    pub latest_ledger: u32,
}

impl SimulationResponse {
    /// The declared resource budget.
    pub fn resources(&self) -> &SorobanResources {
        &self.transaction_data.resources
    }

    /// The declared storage footprint.
    pub fn footprint(&self) -> &LedgerFootprint {
        &self.resources().footprint
    }

    /// Rebuilds the transaction data around new resources and fee, keeping
    /// the opaque extension untouched.
    pub fn rebuild_transaction_data(
        &self,
        resources: SorobanResources,
        resource_fee: i64,
    ) -> SorobanTransactionData {
        SorobanTransactionData {
            ext: self.transaction_data.ext.clone(),
            resources,
            resource_fee,
        }
    }
}
