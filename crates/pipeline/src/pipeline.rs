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

use std::time::Instant;

use anyhow::anyhow;
use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use rand::Rng;
use sorauth_signer::AuthorizationSigner;
use sorauth_types::{authorization_payload_hash, ChainSpec, ContextRuleType, SimulationResponse};
use stellar_xdr::curr::{
    ScAddress, ScVal, SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanCredentials,
    SorobanResources,
};
use tracing::instrument;

use crate::{
    error::DelegatedAuthError,
    footprint::{expand_footprint, smart_account_ledger_keys},
    invocation::check_auth_invocation,
    locate::find_smart_account_entry,
    resources::recompute_resources,
};

/// Validity window of the stamped signatures, in ledgers past the latest
/// known ledger. Sized to outlive typical submission latency.
pub const SIGNATURE_EXPIRATION_LEDGERS: u32 = 100;

/// Augmentation settings
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// Instruction budget bump covering the verification call
    pub extra_instructions: u32,
    /// Disk read byte budget bump
    pub extra_disk_read_bytes: u32,
    /// Write byte budget bump
    pub extra_write_bytes: u32,
    /// Resource fee scale factor, at least 1
    pub fee_multiplier: i64,
    /// Id of the context rule whose records enter the footprint
    pub context_rule_id: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extra_instructions: 1_500_000,
            extra_disk_read_bytes: 5_000,
            extra_write_bytes: 100,
            fee_multiplier: 3,
            context_rule_id: 0,
        }
    }
}

impl Settings {
    /// Check if the settings are valid
    pub fn validate(&self) -> Option<String> {
        if self.fee_multiplier < 1 {
            return Some("fee_multiplier must be at least 1".to_string());
        }
        None
    }
}

#[derive(Metrics)]
#[metrics(scope = "delegated_auth")]
struct DelegatedAuthMetrics {
    #[metric(describe = "the count of simulation responses augmented with a delegated signature.")]
    augmented: Counter,
    #[metric(describe = "the count of simulation responses passed through unchanged.")]
    passed_through: Counter,
    #[metric(describe = "the distribution of signing oracle latency.")]
    sign_ms: Histogram,
}

/// Augments simulation responses so a delegated signer satisfies a smart
/// account's authorization requirement.
///
/// Holds no state across calls; each [`authorize`](Self::authorize) operates
/// on its own copies and either returns a fully augmented response or fails
/// without surfacing any partial mutation.
pub struct DelegatedAuthorizer<S> {
    chain_spec: ChainSpec,
    smart_account: ScAddress,
    signer: S,
    settings: Settings,
    metrics: DelegatedAuthMetrics,
}

impl<S> DelegatedAuthorizer<S>
where
    S: AuthorizationSigner,
{
    /// Creates an authorizer for one smart account and one delegated signer.
    pub fn new(chain_spec: ChainSpec, smart_account: ScAddress, signer: S, settings: Settings) -> Self {
        Self {
            chain_spec,
            smart_account,
            signer,
            settings,
            metrics: DelegatedAuthMetrics::default(),
        }
    }

    /// Applies the delegated-signer augmentation to one simulation response.
    ///
    /// If the response carries no authorization entries, or none is
    /// addressed to the smart account, the response is returned unchanged.
    /// On the success path the smart account's entry is replaced in place
    /// and the signed companion entry is appended last.
    #[instrument(skip_all)]
    pub async fn authorize(
        &self,
        response: SimulationResponse,
    ) -> Result<SimulationResponse, DelegatedAuthError> {
        if response.auth_entries.is_empty() {
            tracing::debug!("no authorization entries, passing response through");
            self.metrics.passed_through.increment(1);
            return Ok(response);
        }
        let Some(index) = find_smart_account_entry(&response.auth_entries, &self.smart_account)
        else {
            tracing::debug!("no entry addressed to the smart account, passing response through");
            self.metrics.passed_through.increment(1);
            return Ok(response);
        };

        let expiration_ledger = response.latest_ledger + SIGNATURE_EXPIRATION_LEDGERS;
        let signer_key = self.signer.signer_key();
        let network_id = self.chain_spec.network_id();

        let primary = &response.auth_entries[index];
        let SorobanCredentials::Address(credentials) = &primary.credentials else {
            return Err(anyhow!("located entry must carry address credentials").into());
        };

        // Replacement for the primary entry: same invocation and nonce, a
        // fresh expiration, and the placeholder signatures value. The entry
        // in the input sequence is never aliased or mutated.
        let stamped = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: credentials.address.clone(),
                nonce: credentials.nonce,
                signature_expiration_ledger: expiration_ledger,
                signature: signer_key.placeholder_signatures()?,
            }),
            root_invocation: primary.root_invocation.clone(),
        };

        let payload_hash = authorization_payload_hash(
            &network_id,
            credentials.nonce,
            expiration_ledger,
            &primary.root_invocation,
        )?;

        // thread_rng is a CSPRNG; nonces must not be predictable or collide
        // across invocations.
        let nonce: i64 = rand::thread_rng().gen();
        let unsigned = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: signer_key.address(),
                nonce,
                signature_expiration_ledger: expiration_ledger,
                signature: ScVal::Void,
            }),
            root_invocation: check_auth_invocation(&self.smart_account, payload_hash)?,
        };

        let sign_start = Instant::now();
        let signed = self
            .signer
            .sign_authorization_entry(unsigned, expiration_ledger, network_id)
            .await?;
        self.metrics
            .sign_ms
            .record(sign_start.elapsed().as_millis() as f64);

        // The oracle assigns or confirms the nonce; the read-write nonce key
        // must match whatever it settled on.
        let SorobanCredentials::Address(signed_credentials) = &signed.credentials else {
            return Err(anyhow!("oracle returned an entry without address credentials").into());
        };
        let signed_nonce = signed_credentials.nonce;

        let mut extra_read_only = vec![signer_key.account_ledger_key()];
        extra_read_only.extend(smart_account_ledger_keys(
            &self.smart_account,
            &ContextRuleType::Default,
            self.settings.context_rule_id,
        )?);
        let extra_read_write = vec![signer_key.nonce_ledger_key(signed_nonce)];
        let footprint = expand_footprint(response.footprint(), extra_read_only, extra_read_write)?;

        let (resources, resource_fee) = recompute_resources(
            &SorobanResources {
                footprint,
                ..response.resources().clone()
            },
            response.transaction_data.resource_fee,
            self.settings.extra_instructions,
            self.settings.extra_disk_read_bytes,
            self.settings.extra_write_bytes,
            self.settings.fee_multiplier,
        )?;

        let transaction_data = response.rebuild_transaction_data(resources, resource_fee);
        let latest_ledger = response.latest_ledger;
        let mut auth_entries = response.auth_entries;
        auth_entries[index] = stamped;
        auth_entries.push(signed);

        self.metrics.augmented.increment(1);
        Ok(SimulationResponse {
            auth_entries,
            transaction_data,
            min_resource_fee: resource_fee,
            latest_ledger,
        })
    }
}

#[cfg(test)]
mod tests {
    use sorauth_signer::LocalSigner;
    use sorauth_types::DelegatedSignerKey;
    use stellar_xdr::curr::{
        BytesM, ContractDataDurability, ContractId, Hash, InvokeContractArgs, LedgerFootprint,
        LedgerKey, LedgerKeyContractData, ScBytes, ScSymbol, SorobanAuthorizedFunction,
        SorobanAuthorizedInvocation, SorobanTransactionData, SorobanTransactionDataExt, StringM,
    };

    use super::*;

    const SECRET: [u8; 32] = [42; 32];

    fn smart_account() -> ScAddress {
        ScAddress::Contract(ContractId(Hash([1; 32])))
    }

    fn other_contract() -> ScAddress {
        ScAddress::Contract(ContractId(Hash([2; 32])))
    }

    fn entry_for(address: ScAddress, nonce: i64) -> SorobanAuthorizationEntry {
        SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address,
                nonce,
                signature_expiration_ledger: 0,
                signature: ScVal::Void,
            }),
            root_invocation: SorobanAuthorizedInvocation {
                function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                    contract_address: other_contract(),
                    function_name: ScSymbol(StringM::try_from("transfer").unwrap()),
                    args: vec![ScVal::U32(5)].try_into().unwrap(),
                }),
                sub_invocations: Default::default(),
            },
        }
    }

    fn existing_key() -> LedgerKey {
        LedgerKey::ContractData(LedgerKeyContractData {
            contract: other_contract(),
            key: ScVal::LedgerKeyContractInstance,
            durability: ContractDataDurability::Persistent,
        })
    }

    fn response(auth_entries: Vec<SorobanAuthorizationEntry>) -> SimulationResponse {
        SimulationResponse {
            auth_entries,
            transaction_data: SorobanTransactionData {
                ext: SorobanTransactionDataExt::V0,
                resources: SorobanResources {
                    footprint: LedgerFootprint {
                        read_only: vec![existing_key()].try_into().unwrap(),
                        read_write: Default::default(),
                    },
                    instructions: 2_000_000,
                    disk_read_bytes: 10_000,
                    write_bytes: 500,
                },
                resource_fee: 1_000,
            },
            min_resource_fee: 1_000,
            latest_ledger: 1_000,
        }
    }

    fn authorizer() -> DelegatedAuthorizer<LocalSigner> {
        DelegatedAuthorizer::new(
            ChainSpec::default(),
            smart_account(),
            LocalSigner::new(&SECRET),
            Settings::default(),
        )
    }

    struct FailingSigner;

    #[async_trait::async_trait]
    impl AuthorizationSigner for FailingSigner {
        fn signer_key(&self) -> DelegatedSignerKey {
            DelegatedSignerKey::new([7; 32])
        }

        async fn sign_authorization_entry(
            &self,
            _entry: SorobanAuthorizationEntry,
            _signature_expiration_ledger: u32,
            _network_id: Hash,
        ) -> sorauth_signer::Result<SorobanAuthorizationEntry> {
            Err(sorauth_signer::Error::SigningError(
                "oracle unreachable".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn empty_entries_pass_through_unchanged() {
        let input = response(vec![]);
        let output = authorizer().authorize(input.clone()).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn foreign_entries_pass_through_unchanged() {
        let input = response(vec![entry_for(other_contract(), 3)]);
        let output = authorizer().authorize(input.clone()).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn matching_entry_is_stamped_and_companion_appended() {
        let authorizer = authorizer();
        let signer_key = LocalSigner::new(&SECRET).signer_key();
        let input = response(vec![
            entry_for(other_contract(), 3),
            entry_for(smart_account(), 77),
        ]);
        let output = authorizer.authorize(input.clone()).await.unwrap();

        assert_eq!(output.auth_entries.len(), input.auth_entries.len() + 1);
        // Unrelated entry and positions are preserved.
        assert_eq!(output.auth_entries[0], input.auth_entries[0]);

        let SorobanCredentials::Address(stamped) = &output.auth_entries[1].credentials else {
            panic!("expected address credentials");
        };
        assert_eq!(stamped.address, smart_account());
        assert_eq!(stamped.nonce, 77);
        assert_eq!(stamped.signature_expiration_ledger, 1_100);
        assert_eq!(
            stamped.signature,
            signer_key.placeholder_signatures().unwrap()
        );
        assert_eq!(
            output.auth_entries[1].root_invocation,
            input.auth_entries[1].root_invocation
        );

        // Companion entry: addressed to the signer, expires with the
        // primary, authorizes __check_auth over the payload hash.
        let companion = output.auth_entries.last().unwrap();
        let SorobanCredentials::Address(companion_credentials) = &companion.credentials else {
            panic!("expected address credentials");
        };
        assert_eq!(companion_credentials.address, signer_key.address());
        assert_eq!(companion_credentials.signature_expiration_ledger, 1_100);

        let expected_payload = authorization_payload_hash(
            &ChainSpec::default().network_id(),
            77,
            1_100,
            &input.auth_entries[1].root_invocation,
        )
        .unwrap();
        let SorobanAuthorizedFunction::ContractFn(call) = &companion.root_invocation.function
        else {
            panic!("expected contract call");
        };
        assert_eq!(call.contract_address, smart_account());
        assert_eq!(
            call.args.to_vec(),
            vec![ScVal::Bytes(ScBytes(
                BytesM::try_from(expected_payload.to_vec()).unwrap()
            ))]
        );

        // Re-running the locator on the output still finds the primary
        // entry, never the companion.
        assert_eq!(
            find_smart_account_entry(&output.auth_entries, &smart_account()),
            Some(1)
        );
    }

    #[tokio::test]
    async fn budget_and_fee_are_recomputed() {
        let input = response(vec![entry_for(smart_account(), 1)]);
        let output = authorizer().authorize(input).await.unwrap();

        let resources = output.resources();
        assert_eq!(resources.instructions, 3_500_000);
        assert_eq!(resources.disk_read_bytes, 15_000);
        assert_eq!(resources.write_bytes, 600);
        assert_eq!(output.transaction_data.resource_fee, 3_000);
        assert_eq!(output.min_resource_fee, 3_000);
        assert_eq!(output.transaction_data.ext, SorobanTransactionDataExt::V0);
    }

    #[tokio::test]
    async fn footprint_is_widened_without_shrinking() {
        let signer_key = LocalSigner::new(&SECRET).signer_key();
        let input = response(vec![entry_for(smart_account(), 1)]);
        let output = authorizer().authorize(input).await.unwrap();

        let read_only = output.footprint().read_only.to_vec();
        assert!(read_only.contains(&existing_key()));
        assert!(read_only.contains(&signer_key.account_ledger_key()));
        for key in smart_account_ledger_keys(&smart_account(), &ContextRuleType::Default, 0)
            .unwrap()
        {
            assert!(read_only.contains(&key));
        }

        let SorobanCredentials::Address(companion_credentials) =
            &output.auth_entries.last().unwrap().credentials
        else {
            panic!("expected address credentials");
        };
        let read_write = output.footprint().read_write.to_vec();
        assert!(read_write.contains(&signer_key.nonce_ledger_key(companion_credentials.nonce)));
    }

    #[tokio::test]
    async fn signing_failure_aborts_without_partial_output() {
        let authorizer = DelegatedAuthorizer::new(
            ChainSpec::default(),
            smart_account(),
            FailingSigner,
            Settings::default(),
        );
        let input = response(vec![entry_for(smart_account(), 1)]);
        let retained = input.clone();

        let err = authorizer.authorize(input).await.unwrap_err();
        assert!(matches!(err, DelegatedAuthError::Signing(_)));
        // The caller's retained copy is untouched.
        assert_eq!(retained, response(vec![entry_for(smart_account(), 1)]));
    }

    #[tokio::test]
    async fn fee_overflow_aborts() {
        let mut input = response(vec![entry_for(smart_account(), 1)]);
        input.transaction_data.resource_fee = i64::MAX;
        let err = authorizer().authorize(input).await.unwrap_err();
        assert!(matches!(
            err,
            DelegatedAuthError::Resources(crate::ResourceError::FeeOverflow(_, _))
        ));
    }

    #[test]
    fn default_settings_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.extra_instructions, 1_500_000);
        assert_eq!(settings.extra_disk_read_bytes, 5_000);
        assert_eq!(settings.extra_write_bytes, 100);
        assert_eq!(settings.fee_multiplier, 3);
        assert!(settings.validate().is_none());
        assert!(Settings {
            fee_multiplier: 0,
            ..settings
        }
        .validate()
        .is_some());
    }
}
