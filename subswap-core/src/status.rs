//! Status updates delivered for a single submission.

use std::fmt;

use futures::stream::BoxStream;

use crate::outcome::{ChainEvent, DispatchError};

/// Alias for the ordered stream of updates of one submission.
pub type StatusStream = BoxStream<'static, StatusUpdate>;

/// Progress stage reported by the transaction pool or the block import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    /// Accepted by the pool.
    Validated,
    /// Gossiped to peers.
    Broadcast,
    /// Included in a best block.
    InBestBlock,
    /// Included in a finalized block.
    Finalized,
    /// The best block it was included in has been retracted.
    Retracted,
    /// Dropped from the pool.
    Dropped,
    /// Rejected as invalid.
    Invalid,
    /// The node reported an error while watching the transaction.
    Error,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxStage::Validated => "validated",
            TxStage::Broadcast => "broadcast",
            TxStage::InBestBlock => "in best block",
            TxStage::Finalized => "finalized",
            TxStage::Retracted => "retracted",
            TxStage::Dropped => "dropped",
            TxStage::Invalid => "invalid",
            TxStage::Error => "error",
        };
        f.write_str(name)
    }
}

/// One step of the status stream: zero or more events and an optional error.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    /// Where the transaction currently is.
    pub stage: TxStage,
    /// Events of this extrinsic, in emission order.
    pub events: Vec<ChainEvent>,
    /// Execution or transport error, if any.
    pub dispatch_error: Option<DispatchError>,
}

impl StatusUpdate {
    /// An update carrying no events and no error.
    pub fn stage(stage: TxStage) -> Self {
        Self {
            stage,
            events: Vec::new(),
            dispatch_error: None,
        }
    }

    /// An update carrying `events`.
    pub fn with_events(stage: TxStage, events: Vec<ChainEvent>) -> Self {
        Self {
            stage,
            events,
            dispatch_error: None,
        }
    }

    /// An update carrying an error.
    pub fn failed(stage: TxStage, error: DispatchError) -> Self {
        Self {
            stage,
            events: Vec::new(),
            dispatch_error: Some(error),
        }
    }
}
