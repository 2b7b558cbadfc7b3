//! Running estimate of the immediate reward per state-action pair.

use crate::error::Result;
use crate::learning::QTable;
use crate::types::StateActionPair;
use serde::{Deserialize, Serialize};

/// An exponential moving average of observed rewards.
///
/// Entries start at `0.0` and carry no meaning until their pair has been
/// observed; [`RewardModel::is_observed`] tells the two apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardModel {
    rewards: QTable,
    observed: Vec<bool>,
    rate: f64,
}

impl RewardModel {
    /// Creates a model updating with smoothing `rate`.
    pub fn new(num_states: usize, num_actions: usize, rate: f64) -> Self {
        Self {
            rewards: QTable::new(num_states, num_actions),
            observed: vec![false; num_states * num_actions],
            rate,
        }
    }

    /// `R[s,a] ← (1 − rate)·R[s,a] + rate·reward`.
    pub fn update(&mut self, pair: StateActionPair, reward: f64) -> Result<f64> {
        let current = self.rewards.get(pair.state, pair.action)?;
        let estimate = (1.0 - self.rate) * current + self.rate * reward;
        self.rewards.set(pair.state, pair.action, estimate)?;
        let idx = pair.state * self.rewards.num_actions() + pair.action;
        self.observed[idx] = true;
        Ok(estimate)
    }

    /// Returns the current estimate for `pair`.
    pub fn get(&self, pair: StateActionPair) -> Result<f64> {
        self.rewards.get(pair.state, pair.action)
    }

    /// Returns `true` once `pair` has received at least one update.
    pub fn is_observed(&self, pair: StateActionPair) -> bool {
        self.rewards.check_state(pair.state).is_ok()
            && self.rewards.check_action(pair.action).is_ok()
            && self.observed[pair.state * self.rewards.num_actions() + pair.action]
    }
}
