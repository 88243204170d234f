use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::model::SubmissionRecord;

/// Entries kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 256;

/// In-session log of resolved submissions.
///
/// Nothing is persisted; the log starts empty with every process.
pub struct SubmissionLog {
    /// Entries, oldest first.
    entries: Mutex<VecDeque<SubmissionRecord>>,
    /// Maximum number of entries.
    capacity: usize,
}

impl Default for SubmissionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SubmissionLog {
    /// Creates a log holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends `record`, evicting the oldest entry when full.
    pub async fn record(&self, record: SubmissionRecord) {
        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(record);
    }

    /// All entries, oldest first.
    pub async fn history(&self) -> Vec<SubmissionRecord> {
        self.entries.lock().await.iter().cloned().collect()
    }

    /// Entries for the extrinsic `tx_hash`.
    pub async fn get(&self, tx_hash: &str) -> Vec<SubmissionRecord> {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|record| record.tx_hash.as_deref() == Some(tx_hash))
            .cloned()
            .collect()
    }
}
