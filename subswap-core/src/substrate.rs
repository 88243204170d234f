//! substrate chain client
//!
//! [`ChainClient`] implementation over `subxt`'s dynamic transaction and
//! storage API. Transaction progress is translated into [`StatusUpdate`]s;
//! block inclusion updates carry the extrinsic's events and, when
//! `System.ExtrinsicFailed` was emitted, the decoded dispatch error.

use std::time::Duration;

use async_stream::stream;
use async_trait::async_trait;
use log::{error, info, warn};
use snafu::ResultExt;
use subxt::backend::rpc::reconnecting_rpc_client::{PingConfig, RpcClient};
use subxt::dynamic::Value;
use subxt::tx::{TxInBlock, TxProgress, TxStatus};
use subxt::{Metadata, OnlineClient, PolkadotConfig};

use crate::accounts::AccountSigner;
use crate::call::{section_name, to_pascal_case, CallArg, ModuleCall};
use crate::chain::{module_dispatch_error, ChainClient, Submission};
use crate::error::{ChainConnectionSnafu, Result, StorageSnafu, TransactionSnafu};
use crate::outcome::{ChainEvent, DispatchError, ModuleErrorMeta};
use crate::query::{StorageKind, StorageQuery};
use crate::status::{StatusStream, StatusUpdate, TxStage};

/// The `API` type represents a connected Substrate client.
pub type API = OnlineClient<PolkadotConfig>;

/// Status reported by the node for a watched extrinsic.
type Status = TxStatus<PolkadotConfig, API>;

/// Which inclusion the outcome is resolved at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confirmation {
    /// Resolve as soon as the extrinsic is in a best block.
    #[default]
    InBlock,
    /// Only finalized blocks carry events.
    Finalized,
}

/// Chain client backed by a subxt `OnlineClient`.
#[derive(Clone)]
pub struct SubstrateClient {
    /// A client for interacting with the Substrate blockchain.
    api: API,
    /// Inclusion level that carries events.
    confirmation: Confirmation,
}

impl SubstrateClient {
    /// Wraps an existing client.
    pub fn new(api: API, confirmation: Confirmation) -> Self {
        Self { api, confirmation }
    }

    /// Connects to `url` through a reconnecting RPC client.
    pub async fn connect(url: &str, confirmation: Confirmation) -> Result<Self> {
        info!("🔵 Connecting to {url}");
        let rpc_client = RpcClient::builder()
            .request_timeout(Duration::from_secs(60))
            .connection_timeout(Duration::from_secs(10))
            .enable_ws_ping(PingConfig::new())
            .build(url.to_string())
            .await
            .map_err(|e| subxt::Error::Other(e.to_string()))
            .context(ChainConnectionSnafu)?;

        let api = OnlineClient::from_rpc_client(rpc_client)
            .await
            .context(ChainConnectionSnafu)?;
        info!("🟢 Connected to {url}");

        Ok(Self::new(api, confirmation))
    }

    /// Translates the node's progress reports into status updates.
    fn watch(&self, mut progress: TxProgress<PolkadotConfig, API>) -> StatusStream {
        let client = self.clone();
        Box::pin(stream! {
            while let Some(status) = progress.next().await {
                yield client.translate(status).await;
            }
        })
    }

    /// One progress report to one status update.
    async fn translate(&self, status: Result<Status, subxt::Error>) -> StatusUpdate {
        match status {
            Ok(TxStatus::InBestBlock(details)) => {
                info!("📦 Transaction is in the best block {:?}", details.block_hash());
                if self.confirmation == Confirmation::Finalized {
                    return StatusUpdate::stage(TxStage::InBestBlock);
                }
                self.block_update(TxStage::InBestBlock, details).await
            }
            Ok(TxStatus::InFinalizedBlock(details)) => {
                info!("✅ Transaction finalized in block {:?}", details.block_hash());
                self.block_update(TxStage::Finalized, details).await
            }
            other => progress_update(other),
        }
    }

    /// Collects the extrinsic's events in the including block.
    async fn block_update(&self, stage: TxStage, details: TxInBlock<PolkadotConfig, API>) -> StatusUpdate {
        let events = match details.fetch_events().await {
            Ok(events) => events,
            Err(err) => {
                error!("❌ Error fetching blockchain events: {err}");
                return StatusUpdate::failed(
                    stage,
                    DispatchError::opaque(format!("Error fetching blockchain events: {err}")),
                );
            }
        };

        let mut block_events = Vec::new();
        for event in events.iter() {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    warn!("⚠️ Skipping undecodable event: {err}");
                    continue;
                }
            };

            let payload = match event.field_values() {
                Ok(fields) => Value::unnamed_composite(fields.into_values().map(Value::remove_context)),
                Err(_) => Value::unnamed_composite(Vec::<Value>::new()),
            };
            block_events.push(BlockEvent {
                pallet: event.pallet_name().to_string(),
                variant: event.variant_name().to_string(),
                payload,
                field_bytes: event.field_bytes().to_vec(),
            });
        }

        let metadata = self.api.metadata();
        block_status(stage, block_events, |field_bytes| {
            self.decode_dispatch_error(field_bytes, &metadata)
        })
    }

    /// Decodes the dispatch error carried by `System.ExtrinsicFailed`.
    fn decode_dispatch_error(&self, field_bytes: &[u8], metadata: &Metadata) -> DispatchError {
        match subxt::error::DispatchError::decode_from(field_bytes, metadata.clone()) {
            Ok(subxt::error::DispatchError::Module(module_error)) => {
                // Pallet index, then the first byte of the error index.
                let bytes = module_error.bytes();
                module_dispatch_error(self, bytes[0], bytes[1], || module_error.to_string())
            }
            Ok(other) => DispatchError::opaque(other.to_string()),
            Err(err) => DispatchError::opaque(format!("Undecodable dispatch error: {err}")),
        }
    }
}

/// Progress reports that need no block lookup.
fn progress_update(status: Result<Status, subxt::Error>) -> StatusUpdate {
    match status {
        Ok(TxStatus::Validated) => StatusUpdate::stage(TxStage::Validated),
        Ok(TxStatus::Broadcasted { num_peers }) => {
            info!("📡 Transaction broadcasted to {} peers.", num_peers);
            StatusUpdate::stage(TxStage::Broadcast)
        }
        Ok(TxStatus::NoLongerInBestBlock) => {
            warn!("⚠️ Transaction is no longer in the best block. It might have been replaced or forked.");
            StatusUpdate::stage(TxStage::Retracted)
        }
        Ok(TxStatus::InBestBlock(_)) => StatusUpdate::stage(TxStage::InBestBlock),
        Ok(TxStatus::InFinalizedBlock(_)) => StatusUpdate::stage(TxStage::Finalized),
        Ok(TxStatus::Error { message }) => {
            error!("❌ Error while watching transaction progress: {message}");
            StatusUpdate::failed(TxStage::Error, DispatchError::opaque(message))
        }
        Ok(TxStatus::Dropped { message }) => {
            error!("❌ Error transaction dropped: {message}");
            StatusUpdate::failed(TxStage::Dropped, DispatchError::opaque(message))
        }
        Ok(TxStatus::Invalid { message }) => {
            error!("❌ Error transaction invalid: {message}");
            StatusUpdate::failed(TxStage::Invalid, DispatchError::opaque(message))
        }
        Err(err) => {
            error!("❌ Error while watching transaction progress: {}", err);
            StatusUpdate::failed(TxStage::Error, DispatchError::opaque(err.to_string()))
        }
    }
}

/// An event of the including block, as read from the node.
#[derive(Debug, Clone)]
struct BlockEvent {
    /// Metadata pallet name (`MarketModule`).
    pallet: String,
    /// Event variant name.
    variant: String,
    /// Decoded event fields.
    payload: Value,
    /// SCALE encoded event fields.
    field_bytes: Vec<u8>,
}

/// Builds the update for a block inclusion from the extrinsic's events.
///
/// `System.ExtrinsicFailed` sets the dispatch error through `decode_error`;
/// every event, that one included, is carried under its section name.
fn block_status(
    stage: TxStage,
    events: Vec<BlockEvent>,
    decode_error: impl Fn(&[u8]) -> DispatchError,
) -> StatusUpdate {
    let mut update = StatusUpdate::stage(stage);
    for event in events {
        if event.pallet == "System" && event.variant == "ExtrinsicFailed" {
            let error = decode_error(&event.field_bytes);
            error!("❌ Extrinsic execution failed in {stage} block: {error:?}");
            update.dispatch_error = Some(error);
        }
        update.events.push(ChainEvent::with_payload(
            section_name(&event.pallet),
            event.variant,
            event.payload,
        ));
    }
    update
}

/// Encodes a call argument for the dynamic API.
fn encode_arg(arg: &CallArg) -> Value {
    match arg {
        CallArg::AssetId(id) => Value::u128(*id as u128),
        CallArg::Balance(amount) => Value::u128(*amount),
        CallArg::Account(account) => Value::from_bytes(account.0),
        CallArg::Target(account) => {
            Value::unnamed_variant("Id", vec![Value::from_bytes(account.0)])
        }
        CallArg::Tuple(items) => Value::unnamed_composite(items.iter().map(encode_arg)),
    }
}

#[async_trait]
impl ChainClient for SubstrateClient {
    async fn submit_and_watch(
        &self,
        call: &ModuleCall,
        signer: &AccountSigner,
    ) -> Result<Submission> {
        let payload = subxt::dynamic::tx(
            call.module().pallet_name(),
            call.call_name(),
            call.args().iter().map(encode_arg).collect::<Vec<_>>(),
        );

        let progress = self
            .api
            .tx()
            .sign_and_submit_then_watch_default(&payload, signer.keypair())
            .await
            .context(TransactionSnafu)?;

        Ok(Submission {
            extrinsic_hash: progress.extrinsic_hash(),
            updates: self.watch(progress),
        })
    }

    async fn fetch_storage(&self, query: &StorageQuery) -> Result<Option<Value>> {
        let address = subxt::dynamic::storage(
            query.module.pallet_name(),
            to_pascal_case(&query.entry),
            query.keys.iter().map(encode_arg).collect::<Vec<_>>(),
        );
        let context = |_: &mut subxt::Error| StorageSnafu {
            module: query.module.section(),
            entry: query.entry.clone(),
        };

        let storage = self.api.storage().at_latest().await.with_context(context)?;
        let thunk = match query.kind {
            StorageKind::ValueQuery => Some(
                storage
                    .fetch_or_default(&address)
                    .await
                    .with_context(context)?,
            ),
            StorageKind::OptionQuery => storage.fetch(&address).await.with_context(context)?,
        };

        thunk
            .map(|thunk| {
                thunk
                    .to_value()
                    .map(Value::remove_context)
                    .map_err(subxt::Error::from)
            })
            .transpose()
            .with_context(context)
    }

    fn lookup_module_error(&self, pallet_index: u8, error_index: u8) -> Option<ModuleErrorMeta> {
        let metadata = self.api.metadata();
        let pallet = metadata.pallet_by_index(pallet_index)?;
        let variant = pallet.error_variant_by_index(error_index)?;

        Some(ModuleErrorMeta {
            module: section_name(pallet.name()),
            error_name: variant.name.clone(),
            docs: variant.docs.join(" "),
        })
    }
}

#[cfg(test)]
mod tests {
    use subxt::ext::scale_value::{Composite, ValueDef};
    use subxt_signer::sr25519::dev;

    use super::*;
    use crate::call::Module;
    use crate::outcome::Outcome;
    use crate::resolver::OutcomeResolver;
    use crate::testing::MockChain;

    fn block_event(pallet: &str, variant: &str, field_bytes: Vec<u8>) -> BlockEvent {
        BlockEvent {
            pallet: pallet.to_string(),
            variant: variant.to_string(),
            payload: Value::unnamed_composite(Vec::<Value>::new()),
            field_bytes,
        }
    }

    #[test]
    fn we_can_encode_lookup_targets_as_multi_address_ids() {
        let bob = dev::bob().public_key().to_account_id();

        let value = encode_arg(&CallArg::Target(bob.clone()));
        match value.value {
            ValueDef::Variant(variant) => {
                assert_eq!(variant.name, "Id");
                assert_eq!(variant.values.len(), 1);
            }
            other => panic!("expected a variant, got {other:?}"),
        }

        assert_eq!(
            encode_arg(&CallArg::Account(bob.clone())),
            Value::from_bytes(bob.0)
        );
    }

    #[test]
    fn we_can_encode_tuple_keys() {
        let value = encode_arg(&CallArg::Tuple(vec![
            CallArg::AssetId(1),
            CallArg::AssetId(2),
        ]));

        assert_eq!(
            value.value,
            ValueDef::Composite(Composite::Unnamed(vec![Value::u128(1), Value::u128(2)]))
        );
    }

    #[test]
    fn we_can_decode_the_dispatch_error_of_a_failed_extrinsic() {
        let chain = MockChain::new();
        let events = vec![
            block_event("TokenModule", "Transferred", Vec::new()),
            block_event("System", "ExtrinsicFailed", vec![9, 1, 0, 0, 0]),
        ];

        let update = block_status(TxStage::InBestBlock, events, |field_bytes| {
            module_dispatch_error(&chain, field_bytes[0], field_bytes[1], || {
                "undecodable".to_string()
            })
        });

        assert_eq!(
            update.dispatch_error,
            Some(DispatchError::Module {
                module: "tokenModule".into(),
                error_name: "BalanceLow".into(),
            })
        );
        assert_eq!(update.events.len(), 2);

        let mut resolver = OutcomeResolver::new(Module::Token);
        assert_eq!(
            resolver.observe(&update).map(ToString::to_string),
            Some("Error:tokenModule.BalanceLow".to_string())
        );
    }

    #[test]
    fn we_can_fall_back_to_the_description_of_unknown_module_errors() {
        let chain = MockChain::new();
        let events = vec![block_event("System", "ExtrinsicFailed", vec![42, 7, 0, 0, 0])];

        let update = block_status(TxStage::Finalized, events, |field_bytes| {
            module_dispatch_error(&chain, field_bytes[0], field_bytes[1], || {
                "Module error 42/7".to_string()
            })
        });

        assert_eq!(update.stage, TxStage::Finalized);
        assert_eq!(
            update.dispatch_error,
            Some(DispatchError::opaque("Module error 42/7"))
        );
    }

    #[test]
    fn we_can_carry_block_events_under_their_section_names() {
        let events = vec![
            block_event("MarketModule", "LiquidityMinted", Vec::new()),
            block_event("System", "ExtrinsicSuccess", Vec::new()),
        ];

        let update = block_status(TxStage::InBestBlock, events, |_| {
            panic!("no dispatch error to decode")
        });

        assert_eq!(update.dispatch_error, None);
        let sections: Vec<_> = update
            .events
            .iter()
            .map(|event| (event.module.as_str(), event.method.as_str()))
            .collect();
        assert_eq!(
            sections,
            vec![("marketModule", "LiquidityMinted"), ("system", "ExtrinsicSuccess")]
        );

        let mut resolver = OutcomeResolver::new(Module::Market);
        assert_eq!(
            resolver.observe(&update).map(ToString::to_string),
            Some("Success:marketModule.LiquidityMinted".to_string())
        );
    }

    #[test]
    fn we_can_report_dropped_and_invalid_transactions_as_opaque_failures() {
        let reports: Vec<(Result<Status, subxt::Error>, TxStage)> = vec![
            (
                Ok(TxStatus::Dropped {
                    message: "Transaction dropped from the pool".into(),
                }),
                TxStage::Dropped,
            ),
            (
                Ok(TxStatus::Invalid {
                    message: "Transaction is outdated".into(),
                }),
                TxStage::Invalid,
            ),
            (
                Err(subxt::Error::Other("connection reset".into())),
                TxStage::Error,
            ),
        ];

        for (report, stage) in reports {
            let update = progress_update(report);
            assert_eq!(update.stage, stage);
            assert!(update.events.is_empty());

            let mut resolver = OutcomeResolver::new(Module::Oracle);
            assert!(matches!(
                resolver.observe(&update),
                Some(Outcome::OpaqueFailure { .. })
            ));
        }
    }

    #[test]
    fn we_cannot_resolve_on_pool_progress_alone() {
        let reports: Vec<Result<Status, subxt::Error>> = vec![
            Ok(TxStatus::Validated),
            Ok(TxStatus::Broadcasted { num_peers: 3 }),
            Ok(TxStatus::NoLongerInBestBlock),
        ];

        let mut resolver = OutcomeResolver::new(Module::Token);
        let stages: Vec<_> = reports
            .into_iter()
            .map(progress_update)
            .inspect(|update| assert_eq!(resolver.observe(update), None))
            .map(|update| update.stage)
            .collect();

        assert_eq!(
            stages,
            vec![TxStage::Validated, TxStage::Broadcast, TxStage::Retracted]
        );
        assert!(!resolver.is_resolved());
    }
}
