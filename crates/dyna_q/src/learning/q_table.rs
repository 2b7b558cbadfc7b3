//! The dense value store backing the learner.

use crate::error::{Error, Result};
use crate::types::{ActionId, StateId};
use serde::{Deserialize, Serialize};

/// A dense `num_states × num_actions` table of Q-values, stored row-major.
///
/// The shape is fixed at construction. Every entry starts at `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
}

impl QTable {
    /// Creates a zero-initialized table.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Fails with [`Error::InvalidState`] unless `state` indexes a row.
    pub fn check_state(&self, state: StateId) -> Result<()> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(Error::InvalidState {
                state,
                num_states: self.num_states,
            })
        }
    }

    /// Fails with [`Error::InvalidAction`] unless `action` indexes a column.
    pub fn check_action(&self, action: ActionId) -> Result<()> {
        if action < self.num_actions {
            Ok(())
        } else {
            Err(Error::InvalidAction {
                action,
                num_actions: self.num_actions,
            })
        }
    }

    fn offset(&self, state: StateId, action: ActionId) -> Result<usize> {
        self.check_state(state)?;
        self.check_action(action)?;
        Ok(state * self.num_actions + action)
    }

    /// Returns `Q[state, action]`.
    pub fn get(&self, state: StateId, action: ActionId) -> Result<f64> {
        let idx = self.offset(state, action)?;
        Ok(self.values[idx])
    }

    /// Overwrites `Q[state, action]`.
    pub fn set(&mut self, state: StateId, action: ActionId, value: f64) -> Result<()> {
        let idx = self.offset(state, action)?;
        self.values[idx] = value;
        Ok(())
    }

    /// Returns the row of Q-values for `state`.
    pub fn row(&self, state: StateId) -> Result<&[f64]> {
        self.check_state(state)?;
        let start = state * self.num_actions;
        Ok(&self.values[start..start + self.num_actions])
    }

    /// Returns `max_a Q[state, a]`.
    pub fn max_value(&self, state: StateId) -> Result<f64> {
        Ok(self
            .row(state)?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Returns the action with the highest value in `state`.
    ///
    /// Ties go to the lowest index.
    pub fn best_action(&self, state: StateId) -> Result<ActionId> {
        let row = self.row(state)?;
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        Ok(best)
    }

    /// Returns the greedy action for every state, in state order.
    pub fn greedy_policy(&self) -> Vec<ActionId> {
        (0..self.num_states)
            .map(|s| self.best_action(s).unwrap_or(0))
            .collect()
    }

    /// Returns the raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Resets every entry to `0.0`, keeping the shape.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }
}
