//! Outcome resolver
//!
//! Turns the multiplexed status stream of one submission into exactly one
//! [`Outcome`]. The resolver starts `Pending` and inspects every update in
//! arrival order:
//!
//! - a dispatch error resolves to a failure, even if the same update also
//!   carries an event of the module under call;
//! - otherwise the first event emitted by the module under call resolves to a
//!   success named after that event;
//! - anything else (pool progress, events of other modules) leaves it pending.
//!
//! Once resolved, every further update is discarded and the outcome never
//! changes.

use futures::StreamExt;
use log::debug;

use crate::call::Module;
use crate::outcome::Outcome;
use crate::status::{StatusStream, StatusUpdate};

/// Resolution state of a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// No authoritative signal observed yet.
    Pending,
    /// Terminal.
    Resolved(Outcome),
}

/// Incremental resolver fed with the status updates of one submission.
#[derive(Debug, Clone)]
pub struct OutcomeResolver {
    /// Section name of the module under call.
    module: String,
    /// Current state.
    state: State,
}

impl OutcomeResolver {
    /// Creates a pending resolver for a call targeting `module`.
    pub fn new(module: Module) -> Self {
        Self::for_section(module.section())
    }

    /// Creates a pending resolver matching events by raw section name.
    pub fn for_section(section: impl Into<String>) -> Self {
        Self {
            module: section.into(),
            state: State::Pending,
        }
    }

    /// Feeds one update. Returns the outcome if this update resolved the
    /// submission, `None` if it is still pending or was already resolved.
    pub fn observe(&mut self, update: &StatusUpdate) -> Option<&Outcome> {
        if self.is_resolved() {
            debug!("discarding {} update after resolution", update.stage);
            return None;
        }

        let outcome = if let Some(error) = &update.dispatch_error {
            Outcome::from(error.clone())
        } else {
            // Multiple events of the module under call may be present; the
            // first one wins regardless of its method name.
            let event = update
                .events
                .iter()
                .find(|event| event.module == self.module)?;
            Outcome::Success {
                module: event.module.clone(),
                method: event.method.clone(),
            }
        };

        self.state = State::Resolved(outcome);
        self.outcome()
    }

    /// The recorded outcome, if resolved.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            State::Pending => None,
            State::Resolved(outcome) => Some(outcome),
        }
    }

    /// Whether a terminal outcome has been recorded.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }
}

/// Drives a whole status stream through a resolver for `module`.
///
/// Returns the first outcome, or `None` if the stream ended while pending.
/// The stream is dropped as soon as the outcome is known.
pub async fn resolve(module: Module, mut updates: StatusStream) -> Option<Outcome> {
    let mut resolver = OutcomeResolver::new(module);
    while let Some(update) = updates.next().await {
        if let Some(outcome) = resolver.observe(&update) {
            return Some(outcome.clone());
        }
    }
    None
}
