//! Stub chain client and state builders used by handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use subswap_core::accounts::{AccountSigner, Keyring};
use subswap_core::call::ModuleCall;
use subswap_core::chain::{ChainClient, ChainHandle, Submission};
use subswap_core::error::Result;
use subswap_core::outcome::{ChainEvent, DispatchError, ModuleErrorMeta};
use subswap_core::query::{StorageKind, StorageQuery};
use subswap_core::status::{StatusUpdate, TxStage};
use subxt::dynamic::Value;
use subxt::utils::H256;

use crate::state::GatewayState;

/// Chain double answering every submission with the same block update.
pub(crate) struct StubChain {
    /// Update delivered after `Validated` for each submission.
    block: StatusUpdate,
    /// Storage keyed by query rendering and keys.
    storage: Mutex<HashMap<String, Value>>,
    /// Rendered calls submitted so far.
    submitted: Mutex<Vec<String>>,
}

impl StubChain {
    /// Every submission is included with `events`.
    pub(crate) fn emitting(events: Vec<ChainEvent>) -> Arc<Self> {
        Self::with_block(StatusUpdate::with_events(TxStage::InBestBlock, events))
    }

    /// Every submission fails with `error`.
    pub(crate) fn failing(error: DispatchError) -> Arc<Self> {
        Self::with_block(StatusUpdate::failed(TxStage::InBestBlock, error))
    }

    /// Stub delivering `block` for each submission.
    fn with_block(block: StatusUpdate) -> Arc<Self> {
        Arc::new(Self {
            block,
            storage: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
        })
    }

    /// Stores `value` under `query`.
    pub(crate) fn set_storage(&self, query: &StorageQuery, value: Value) {
        self.storage
            .lock()
            .unwrap()
            .insert(storage_key(query), value);
    }

    /// Calls submitted so far, as `<module>.<operation>`.
    pub(crate) fn submissions(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

/// Storage lookup key for a query.
fn storage_key(query: &StorageQuery) -> String {
    format!("{query}{:?}", query.keys)
}

#[async_trait]
impl ChainClient for StubChain {
    async fn submit_and_watch(
        &self,
        call: &ModuleCall,
        _signer: &AccountSigner,
    ) -> Result<Submission> {
        let index = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(call.to_string());
            submitted.len() as u64
        };

        let updates = vec![StatusUpdate::stage(TxStage::Validated), self.block.clone()];
        Ok(Submission {
            extrinsic_hash: H256::from_low_u64_be(index),
            updates: stream::iter(updates).boxed(),
        })
    }

    async fn fetch_storage(&self, query: &StorageQuery) -> Result<Option<Value>> {
        let stored = self.storage.lock().unwrap().get(&storage_key(query)).cloned();
        Ok(match (stored, query.kind) {
            (None, StorageKind::ValueQuery) => Some(Value::u128(0)),
            (stored, _) => stored,
        })
    }

    fn lookup_module_error(&self, _pallet_index: u8, _error_index: u8) -> Option<ModuleErrorMeta> {
        None
    }
}

/// Gateway state with `chain` installed and a keyring built from `uris`.
pub(crate) fn ready_state(chain: Arc<StubChain>, uris: &[&str]) -> Arc<GatewayState> {
    let keyring = Arc::new(Keyring::from_uris(uris).unwrap());
    Arc::new(GatewayState::new(ChainHandle::ready(chain), keyring))
}

/// Gateway state whose chain connection never completed.
pub(crate) fn pending_state(uris: &[&str]) -> Arc<GatewayState> {
    let keyring = Arc::new(Keyring::from_uris(uris).unwrap());
    Arc::new(GatewayState::new(ChainHandle::new(), keyring))
}
