//! The temporal-difference learning engine.
//!
//! Applies the one-step Q-learning update to a [`QTable`], for both real and
//! synthetic (planned) transitions.

use super::q_table::QTable;
use crate::config::LearnerConfig;
use crate::error::Result;
use crate::types::{ActionId, StateId, Transition};
use serde::{Deserialize, Serialize};

/// Learning parameters of the update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// The learning rate (alpha), determining how much new information overrides old information.
    pub learning_rate: f64,
    /// The discount factor (gamma), determining the importance of future rewards.
    pub discount_factor: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            discount_factor: 0.9,
        }
    }
}

impl From<&LearnerConfig> for LearningConfig {
    fn from(config: &LearnerConfig) -> Self {
        Self {
            learning_rate: config.alpha,
            discount_factor: config.gamma,
        }
    }
}

/// Owns the Q-table and applies Q-learning updates to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningEngine {
    /// The table of learned Q-values.
    q_table: QTable,
    /// The configuration for the learning process.
    config: LearningConfig,
    /// Statistics on the total number of updates performed.
    total_updates: u64,
}

impl LearningEngine {
    /// Creates a new engine with a zero-initialized table.
    pub fn new(num_states: usize, num_actions: usize, config: LearningConfig) -> Self {
        Self {
            q_table: QTable::new(num_states, num_actions),
            config,
            total_updates: 0,
        }
    }

    /// Gets the Q-value for a given state-action pair.
    pub fn q_value(&self, state: StateId, action: ActionId) -> Result<f64> {
        self.q_table.get(state, action)
    }

    /// Computes the updated value without applying it:
    /// `(1 − α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))`.
    pub fn target(&self, transition: &Transition) -> Result<f64> {
        let current_q = self.q_table.get(transition.state, transition.action)?;
        let max_next_q = self.q_table.max_value(transition.next_state)?;
        let alpha = self.config.learning_rate;

        let td_target = transition.reward + self.config.discount_factor * max_next_q;
        Ok((1.0 - alpha) * current_q + alpha * td_target)
    }

    /// Performs a Q-learning update for `transition` and returns the new value.
    ///
    /// Nothing is written if any index in the transition is out of range.
    pub fn update(&mut self, transition: &Transition) -> Result<f64> {
        let new_q = self.target(transition)?;
        self.q_table
            .set(transition.state, transition.action, new_q)?;
        self.total_updates += 1;
        Ok(new_q)
    }

    /// Returns the total number of updates performed.
    pub fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Returns a reference to the Q-table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Clears all learned Q-values.
    pub fn reset(&mut self) {
        self.q_table.clear();
        self.total_updates = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn engine(alpha: f64, gamma: f64) -> LearningEngine {
        LearningEngine::new(
            4,
            2,
            LearningConfig {
                learning_rate: alpha,
                discount_factor: gamma,
            },
        )
    }

    #[test]
    fn test_learning_engine_creation() {
        let engine = engine(0.5, 0.9);
        assert_eq!(engine.total_updates(), 0);
        assert_eq!(engine.q_value(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_q_learning_update() {
        let mut engine = engine(0.5, 0.9);

        let new_q = engine.update(&Transition::new(0, 0, 1, 10.0)).unwrap();
        assert_eq!(new_q, 5.0);
        assert_eq!(engine.q_value(0, 0).unwrap(), 5.0);
        assert_eq!(engine.total_updates(), 1);
    }

    #[test]
    fn test_update_bootstraps_from_next_state() {
        let mut engine = engine(0.5, 0.9);
        engine.q_table.set(1, 1, 4.0).unwrap();

        // 0.5 * 0 + 0.5 * (2 + 0.9 * 4)
        let new_q = engine.update(&Transition::new(0, 1, 1, 2.0)).unwrap();
        assert!((new_q - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_full_learning_rate_assigns_reward() {
        let mut engine = engine(1.0, 0.0);
        engine.q_table.set(2, 1, 7.0).unwrap();

        engine.update(&Transition::new(2, 1, 3, -4.0)).unwrap();
        assert_eq!(engine.q_value(2, 1).unwrap(), -4.0);
    }

    #[test]
    fn test_zero_learning_rate_is_noop() {
        let mut engine = engine(0.0, 0.9);
        engine.q_table.set(0, 0, 1.25).unwrap();

        engine.update(&Transition::new(0, 0, 1, 100.0)).unwrap();
        assert_eq!(engine.q_value(0, 0).unwrap(), 1.25);
    }

    #[test]
    fn test_invalid_next_state_does_not_mutate() {
        let mut engine = engine(0.5, 0.9);
        let err = engine.update(&Transition::new(0, 0, 9, 1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidState { state: 9, .. }));
        assert_eq!(engine.q_value(0, 0).unwrap(), 0.0);
        assert_eq!(engine.total_updates(), 0);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(0.5, 0.9);
        engine.update(&Transition::new(0, 0, 1, 10.0)).unwrap();
        engine.reset();
        assert_eq!(engine.q_value(0, 0).unwrap(), 0.0);
        assert_eq!(engine.total_updates(), 0);
    }
}
