//! Chain client seam and the process-wide handle to it.

use std::sync::Arc;

use async_trait::async_trait;
use subxt::dynamic::Value;
use subxt::utils::H256;
use tokio::sync::OnceCell;

use crate::accounts::AccountSigner;
use crate::call::ModuleCall;
use crate::error::{Error, Result};
use crate::outcome::{DispatchError, ModuleErrorMeta};
use crate::query::StorageQuery;
use crate::status::StatusStream;

/// A submitted extrinsic and the stream of its status updates.
pub struct Submission {
    /// Hash of the signed extrinsic.
    pub extrinsic_hash: H256,
    /// Status updates in the order the node delivers them.
    pub updates: StatusStream,
}

/// Connection to a Subswap node.
///
/// Implementations build the call by module and operation name with
/// positional arguments, read storage by module and entry name, and translate
/// encoded module errors through the runtime metadata.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Signs `call` with `signer`, submits it and watches its progress.
    async fn submit_and_watch(&self, call: &ModuleCall, signer: &AccountSigner)
        -> Result<Submission>;

    /// Reads one storage item at the latest block.
    ///
    /// Returns `None` only for absent optional items.
    async fn fetch_storage(&self, query: &StorageQuery) -> Result<Option<Value>>;

    /// Resolves an encoded module error to its module and variant name.
    fn lookup_module_error(&self, pallet_index: u8, error_index: u8) -> Option<ModuleErrorMeta>;
}

/// Decodes an encoded module error through `client`'s metadata.
///
/// Unknown codes fall back to an opaque error carrying `fallback`.
pub fn module_dispatch_error(
    client: &dyn ChainClient,
    pallet_index: u8,
    error_index: u8,
    fallback: impl FnOnce() -> String,
) -> DispatchError {
    match client.lookup_module_error(pallet_index, error_index) {
        Some(meta) => meta.into(),
        None => DispatchError::opaque(fallback()),
    }
}

/// Lazily-initialized, process-wide handle to the chain client.
///
/// Clones share the same slot. Callers only ever observe "ready" or "not yet".
#[derive(Clone, Default)]
pub struct ChainHandle {
    /// Set once when the connection is established.
    cell: Arc<OnceCell<Arc<dyn ChainClient>>>,
}

impl ChainHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle that is ready immediately.
    pub fn ready(client: Arc<dyn ChainClient>) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(client))),
        }
    }

    /// Installs the client. Fails if a client was already installed.
    pub fn install(&self, client: Arc<dyn ChainClient>) -> Result<()> {
        self.cell
            .set(client)
            .map_err(|_| Error::AlreadyInitialized)
    }

    /// Returns the client, or [`Error::NotReady`] if it is not installed yet.
    pub fn get(&self) -> Result<Arc<dyn ChainClient>> {
        self.cell.get().cloned().ok_or(Error::NotReady)
    }

    /// Whether the client has been installed.
    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }
}
