//! Error types for the Dyna-Q learner.

use crate::types::{ActionId, StateId};
use thiserror::Error;

/// A specialized `Result` type for learner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error enum for all operations within the `dyna_q` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A state index outside `[0, num_states)` was supplied by the caller.
    #[error("Invalid state: {state} is outside [0, {num_states})")]
    InvalidState {
        /// The offending state index.
        state: StateId,
        /// The number of states the learner was built with.
        num_states: usize,
    },
    /// An action index outside `[0, num_actions)` was produced.
    ///
    /// Callers never supply actions, so this indicates a bug in the learner.
    #[error("Invalid action: {action} is outside [0, {num_actions})")]
    InvalidAction {
        /// The offending action index.
        action: ActionId,
        /// The number of actions the learner was built with.
        num_actions: usize,
    },
    /// A construction parameter was outside its documented range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A configuration or statistics document could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidConfiguration`] with a formatted message.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}
