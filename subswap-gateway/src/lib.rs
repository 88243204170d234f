//! # Subswap Gateway
//!
//! HTTP/JSON boundary over the Subswap client core: one endpoint per runtime
//! extrinsic returning its outcome string, one per query returning its
//! display value, account selection and the session's submission log.

/// Api
pub mod api;

/// Data models
pub mod model;

/// Shared application state.
///
/// Bundles the submitter, query invoker, keyring and submission log handed to
/// every handler.
pub mod state;

/// Submission log module.
///
/// Keeps the resolved submissions of the running session in memory.
pub mod submission_log;

/// Utils
pub mod utils;

#[cfg(test)]
mod testing;
