//! # Subswap Client Core
//!
//! Client-side plumbing for a Subswap node: typed calls for the token, market
//! and oracle modules, signed submission with progress tracking, outcome
//! resolution from block events, and storage queries rendered for display.

/// Account selection and signing.
///
/// Holds the sr25519 keypairs available to the client, tracks the selected
/// account and loads keys from disk.
pub mod accounts;

/// Module calls.
///
/// Names a runtime module operation together with its positional arguments.
pub mod call;

/// Chain client seam.
///
/// The trait the submitter and query invoker talk through, and the
/// lazily-initialized handle shared between them.
pub mod chain;

/// Error handling module.
///
/// Defines a custom error type using the `snafu` crate to provide detailed and structured
/// error messages for various failures encountered when interacting with the blockchain.
pub mod error;

/// Typed operation inputs per runtime module.
pub mod modules;

/// Submission outcomes
pub mod outcome;

/// Storage queries and their display values.
pub mod query;

/// Outcome resolver.
///
/// Turns a submission's status updates into exactly one outcome.
pub mod resolver;

/// Transaction status updates
pub mod status;

/// Transaction submission module.
///
/// Signs calls with the selected account, submits them and completes a
/// handle with the resolved outcome.
pub mod submitter;

/// subxt-backed chain client.
pub mod substrate;

#[cfg(test)]
mod testing;
