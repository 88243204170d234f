//! This module defines the shared application state for the gateway.
//!
//! The `GatewayState` struct holds the submitter, the query invoker, the
//! keyring and the submission log, all sharing one chain handle.

use std::sync::Arc;

use subswap_core::accounts::{AccountProvider, Keyring};
use subswap_core::chain::ChainHandle;
use subswap_core::query::QueryInvoker;
use subswap_core::submitter::TxSubmitter;

use crate::submission_log::SubmissionLog;

/// Represents the shared state for the gateway.
///
/// Wrapped in `Arc` by the router so handlers can share it across tasks.
pub struct GatewayState {
    /// Signs and submits module calls.
    pub submitter: TxSubmitter,

    /// Runs read-only storage queries.
    pub queries: QueryInvoker,

    /// Accounts available for signing and the current selection.
    pub keyring: Arc<Keyring>,

    /// Resolved submissions of this session.
    pub submissions: SubmissionLog,
}

impl GatewayState {
    /// Builds the state over `chain` and `keyring`.
    pub fn new(chain: ChainHandle, keyring: Arc<Keyring>) -> Self {
        let accounts: Arc<dyn AccountProvider> = keyring.clone();
        Self {
            submitter: TxSubmitter::new(chain.clone(), accounts),
            queries: QueryInvoker::new(chain),
            keyring,
            submissions: SubmissionLog::default(),
        }
    }
}
