//! Epsilon-greedy exploration policy with multiplicative decay.

use crate::error::Result;
use crate::learning::QTable;
use crate::random::RandomSource;
use crate::types::{ActionId, StateId};
use serde::{Deserialize, Serialize};

/// How an action was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Drawn uniformly at random.
    Explore(ActionId),
    /// The greedy action of the Q-table row.
    Exploit(ActionId),
}

impl Selection {
    pub fn action(&self) -> ActionId {
        match *self {
            Selection::Explore(a) | Selection::Exploit(a) => a,
        }
    }

    pub fn is_exploration(&self) -> bool {
        matches!(self, Selection::Explore(_))
    }
}

/// Selects actions epsilon-greedily over a [`QTable`].
///
/// With probability `rate` a uniformly random action is returned, otherwise
/// the first action maximizing the row. The rate is multiplied by `decay`
/// on every call to [`EpsilonGreedy::decay`]; there is no floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    rate: f64,
    decay: f64,
}

impl EpsilonGreedy {
    pub fn new(rate: f64, decay: f64) -> Self {
        Self { rate, decay }
    }

    /// Chooses an action for `state`.
    ///
    /// Exactly one uniform draw is consumed per call, plus one index draw
    /// when exploring.
    pub fn select<R: RandomSource + ?Sized>(
        &self,
        q_table: &QTable,
        state: StateId,
        rng: &mut R,
    ) -> Result<Selection> {
        q_table.check_state(state)?;

        let selection = if rng.unit() < self.rate {
            Selection::Explore(rng.index(q_table.num_actions()))
        } else {
            Selection::Exploit(q_table.best_action(state)?)
        };
        q_table.check_action(selection.action())?;
        Ok(selection)
    }

    /// Applies one step of decay: `rate ← rate · decay`.
    pub fn decay(&mut self) {
        self.rate *= self.decay;
    }

    /// Returns the current exploration rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}
