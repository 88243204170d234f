//! substrate transaction submitter
//!
//! [`TxSubmitter::submit`] signs and submits a [`ModuleCall`] and hands back a
//! [`SubmissionHandle`] whose completion slot is written exactly once with the
//! resolved [`Outcome`]. Failures after the precondition checks never surface
//! as errors: they resolve the handle to a failure outcome instead.
//!
//! Submissions are not serialized per account. Callers that need sequential
//! nonces must await the previous outcome before submitting again.

use std::sync::Arc;

use futures::StreamExt;
use log::{error, info, warn};
use snafu::OptionExt;
use subxt::utils::{AccountId32, H256};
use tokio::sync::oneshot;

use crate::accounts::AccountProvider;
use crate::call::ModuleCall;
use crate::chain::ChainHandle;
use crate::error::{NoAccountSelectedSnafu, Result};
use crate::outcome::Outcome;
use crate::resolver::OutcomeResolver;
use crate::status::{StatusStream, TxStage};

/// Description used when the status stream closes while still pending.
pub const STREAM_CLOSED: &str = "status stream closed before the call resolved";

/// Description used when the driving task ends without writing the slot.
const TASK_ABORTED: &str = "submission task ended without an outcome";

/// Single-assignment completion slot.
struct CompletionSlot {
    /// Taken on the first write.
    sender: Option<oneshot::Sender<Outcome>>,
}

impl CompletionSlot {
    /// Creates a slot and the receiving end of its channel.
    fn new() -> (Self, oneshot::Receiver<Outcome>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Writes `outcome` if the slot is still empty. Returns whether it wrote.
    fn complete(&mut self, outcome: Outcome) -> bool {
        match self.sender.take() {
            // The receiver may be gone; the slot still counts as written.
            Some(sender) => {
                let _ = sender.send(outcome);
                true
            }
            None => false,
        }
    }
}

/// One in-flight submission.
#[derive(Debug)]
pub struct SubmissionHandle {
    /// Hash of the extrinsic, if it reached the node.
    extrinsic_hash: Option<H256>,
    /// Receiving end of the completion slot.
    receiver: oneshot::Receiver<Outcome>,
}

impl SubmissionHandle {
    /// A handle that is already resolved.
    fn resolved(outcome: Outcome) -> Self {
        let (mut slot, receiver) = CompletionSlot::new();
        slot.complete(outcome);
        Self {
            extrinsic_hash: None,
            receiver,
        }
    }

    /// Hash of the submitted extrinsic; `None` if submission never happened.
    pub fn extrinsic_hash(&self) -> Option<H256> {
        self.extrinsic_hash
    }

    /// Waits for the outcome.
    ///
    /// There is no timeout: if the node never reports a terminal status, this
    /// never returns.
    pub async fn outcome(self) -> Outcome {
        self.receiver
            .await
            .unwrap_or_else(|_| Outcome::opaque(TASK_ABORTED))
    }
}

/// Signs and submits module calls, resolving each to a single outcome.
#[derive(Clone)]
pub struct TxSubmitter {
    /// Process-wide chain handle.
    chain: ChainHandle,
    /// Source of accounts and signers.
    accounts: Arc<dyn AccountProvider>,
}

impl TxSubmitter {
    /// Creates a submitter over `chain` signing with `accounts`.
    pub fn new(chain: ChainHandle, accounts: Arc<dyn AccountProvider>) -> Self {
        Self { chain, accounts }
    }

    /// Submits `call` as the account currently selected in the provider.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoAccountSelected`](crate::error::Error::NoAccountSelected)
    /// or [`Error::NotReady`](crate::error::Error::NotReady) before anything is
    /// sent. Every later failure resolves the returned handle instead.
    pub async fn submit(&self, call: ModuleCall) -> Result<SubmissionHandle> {
        let account = self.accounts.selected_account();
        self.submit_as(call, account).await
    }

    /// Submits `call` as `account`.
    pub async fn submit_as(
        &self,
        call: ModuleCall,
        account: Option<AccountId32>,
    ) -> Result<SubmissionHandle> {
        let account = account.context(NoAccountSelectedSnafu)?;
        let client = self.chain.get()?;

        let signer = match self.accounts.signer_for(&account).await {
            Ok(signer) => signer,
            Err(err) => {
                warn!("⚠️ Could not obtain a signer for {account}: {err}");
                return Ok(SubmissionHandle::resolved(Outcome::opaque(err.to_string())));
            }
        };

        let submission = match client.submit_and_watch(&call, &signer).await {
            Ok(submission) => submission,
            Err(err) => {
                error!("❌ Failed to submit {call}: {err}");
                return Ok(SubmissionHandle::resolved(Outcome::opaque(err.to_string())));
            }
        };

        let hash = submission.extrinsic_hash;
        info!("✅ Submitted {call} from {account} as {hash:?}");

        let (slot, receiver) = CompletionSlot::new();
        let resolver = OutcomeResolver::new(call.module());
        tokio::spawn(drive(call, hash, submission.updates, resolver, slot));

        Ok(SubmissionHandle {
            extrinsic_hash: Some(hash),
            receiver,
        })
    }
}

/// Feeds `updates` to `resolver` in arrival order and writes the first
/// outcome into `slot`. The stream is dropped once resolved.
async fn drive(
    call: ModuleCall,
    hash: H256,
    mut updates: StatusStream,
    mut resolver: OutcomeResolver,
    mut slot: CompletionSlot,
) {
    while let Some(update) = updates.next().await {
        match update.stage {
            TxStage::Dropped | TxStage::Invalid | TxStage::Error => {
                warn!("⚠️ {call} ({hash:?}) is {}", update.stage)
            }
            stage => info!("📦 {call} ({hash:?}) is {stage}"),
        }

        if let Some(outcome) = resolver.observe(&update) {
            info!("🏁 {call} ({hash:?}) resolved: {outcome}");
            slot.complete(outcome.clone());
            return;
        }
    }

    warn!("⚠️ {call} ({hash:?}): {STREAM_CLOSED}");
    slot.complete(Outcome::opaque(STREAM_CLOSED));
}
