//! Core data types shared by the learner, the policy and the world model.

use serde::{Deserialize, Serialize};

/// A discrete state index in `[0, num_states)`.
///
/// States are opaque to the learner; the caller is responsible for
/// discretizing raw features into this range.
pub type StateId = usize;

/// A discrete action index in `[0, num_actions)`.
pub type ActionId = usize;

/// A composite key representing a state-action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateActionPair {
    pub state: StateId,
    pub action: ActionId,
}

impl StateActionPair {
    pub fn new(state: StateId, action: ActionId) -> Self {
        Self { state, action }
    }
}

impl From<(StateId, ActionId)> for StateActionPair {
    fn from((state, action): (StateId, ActionId)) -> Self {
        Self::new(state, action)
    }
}

/// A single `(state, action, next_state, reward)` tuple, either observed
/// from the environment or synthesized by the world model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateId,
    pub action: ActionId,
    pub next_state: StateId,
    pub reward: f64,
}

impl Transition {
    /// Creates a new `Transition`.
    pub fn new(state: StateId, action: ActionId, next_state: StateId, reward: f64) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }

    /// Returns the `(state, action)` half of the transition.
    pub fn pair(&self) -> StateActionPair {
        StateActionPair::new(self.state, self.action)
    }
}
