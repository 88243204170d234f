//! In-memory chain client used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use subxt::dynamic::Value;
use subxt::utils::{AccountId32, H256};

use crate::accounts::AccountSigner;
use crate::call::ModuleCall;
use crate::chain::{ChainClient, Submission};
use crate::error::{Error, Result};
use crate::outcome::ModuleErrorMeta;
use crate::query::{StorageKind, StorageQuery};
use crate::status::StatusUpdate;

/// Scripted behaviour of the next submission.
pub(crate) enum Script {
    /// Deliver these updates, then close the stream.
    Updates(Vec<StatusUpdate>),
    /// Deliver these updates, then never yield again.
    Hang(Vec<StatusUpdate>),
    /// Reject the submission outright.
    Reject,
}

/// Chain double recording every submission.
#[derive(Default)]
pub(crate) struct MockChain {
    /// Scripts consumed in submission order.
    scripts: Mutex<VecDeque<Script>>,
    /// Storage keyed by query rendering.
    storage: Mutex<HashMap<String, Value>>,
    /// Calls seen so far and the account that signed them.
    submitted: Mutex<Vec<(ModuleCall, AccountId32)>>,
}

impl MockChain {
    /// Creates an empty mock.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues the behaviour of the next submission.
    pub(crate) fn push_script(&self, script: Script) {
        self.scripts.lock().unwrap().push_back(script);
    }

    /// Stores `value` under `query`.
    pub(crate) fn set_storage(&self, query: &StorageQuery, value: Value) {
        self.storage.lock().unwrap().insert(storage_key(query), value);
    }

    /// Calls submitted so far.
    pub(crate) fn submitted(&self) -> Vec<(ModuleCall, AccountId32)> {
        self.submitted.lock().unwrap().clone()
    }
}

/// Storage lookup key for a query.
fn storage_key(query: &StorageQuery) -> String {
    format!("{query}{:?}", query.keys)
}

#[async_trait]
impl ChainClient for MockChain {
    async fn submit_and_watch(
        &self,
        call: &ModuleCall,
        signer: &AccountSigner,
    ) -> Result<Submission> {
        let index = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push((call.clone(), signer.account().clone()));
            submitted.len() as u64
        };

        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Updates(Vec::new()));

        let updates = match script {
            Script::Updates(updates) => stream::iter(updates).boxed(),
            Script::Hang(updates) => stream::iter(updates).chain(stream::pending()).boxed(),
            Script::Reject => {
                return Err(Error::TransactionError {
                    source: subxt::Error::Other("Invalid Transaction: Inability to pay some fees".into()),
                })
            }
        };

        Ok(Submission {
            extrinsic_hash: H256::from_low_u64_be(index),
            updates,
        })
    }

    async fn fetch_storage(&self, query: &StorageQuery) -> Result<Option<Value>> {
        let stored = self.storage.lock().unwrap().get(&storage_key(query)).cloned();
        // Absent value queries read as the entry's default; every numeric
        // entry defaults to zero.
        Ok(match (stored, query.kind) {
            (None, StorageKind::ValueQuery) => Some(Value::u128(0)),
            (stored, _) => stored,
        })
    }

    fn lookup_module_error(&self, pallet_index: u8, error_index: u8) -> Option<ModuleErrorMeta> {
        (pallet_index == 9 && error_index == 1).then(|| ModuleErrorMeta {
            module: "tokenModule".into(),
            error_name: "BalanceLow".into(),
            docs: "Account balance must be greater than or equal to the transfer amount".into(),
        })
    }
}
