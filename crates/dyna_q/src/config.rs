//! Configuration for the Dyna-Q learner.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Defines the construction parameters of a [`QLearner`](crate::QLearner).
///
/// All fields are validated by [`LearnerConfig::validate`] when a learner is
/// built; an invalid configuration never produces a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// The number of discrete states. Must be at least 1.
    pub num_states: usize,
    /// The number of actions available in every state. Must be at least 1.
    pub num_actions: usize,
    /// The learning rate (alpha) used by the update rule and the reward model (0.0 to 1.0).
    pub alpha: f64,
    /// The discount factor (gamma) applied to the value of the next state (0.0 to 1.0).
    pub gamma: f64,
    /// The probability of taking a uniformly random action (0.0 to 1.0).
    pub exploration_rate: f64,
    /// The factor the exploration rate is multiplied by after each step (0.0 to 1.0).
    /// 1.0 disables decay, 0.0 stops exploring after the first step.
    pub exploration_decay: f64,
    /// The number of synthetic planning updates per real step. 0 disables planning.
    pub planning_steps: usize,
    /// Emit diagnostic log records for every action selection.
    pub verbose: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            num_states: 100,
            num_actions: 4,
            alpha: 0.2,
            gamma: 0.9,
            exploration_rate: 0.5,
            exploration_decay: 0.99,
            planning_steps: 0,
            verbose: false,
        }
    }
}

impl LearnerConfig {
    /// Creates a default configuration for the given state and action space.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            num_states,
            num_actions,
            ..Default::default()
        }
    }

    /// Returns a configuration with Dyna-Q planning enabled at its usual
    /// setting of 200 synthetic updates per real step.
    pub fn dyna_mode(num_states: usize, num_actions: usize) -> Self {
        Self {
            planning_steps: 200,
            ..Self::new(num_states, num_actions)
        }
    }

    /// Returns a configuration that never explores: every selection is the
    /// greedy action. Useful for evaluating a trained table.
    pub fn greedy(num_states: usize, num_actions: usize) -> Self {
        Self {
            exploration_rate: 0.0,
            exploration_decay: 1.0,
            ..Self::new(num_states, num_actions)
        }
    }

    /// Sets the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the initial exploration rate and its per-step decay.
    pub fn with_exploration(mut self, rate: f64, decay: f64) -> Self {
        self.exploration_rate = rate;
        self.exploration_decay = decay;
        self
    }

    /// Sets the number of planning updates per real step.
    pub fn with_planning_steps(mut self, steps: usize) -> Self {
        self.planning_steps = steps;
        self
    }

    /// Enables or disables diagnostic output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns `true` if Dyna-Q planning is enabled.
    pub fn planning_enabled(&self) -> bool {
        self.planning_steps > 0
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.num_states == 0 {
            return Err(Error::config("num_states must be at least 1"));
        }
        if self.num_actions == 0 {
            return Err(Error::config("num_actions must be at least 1"));
        }
        if self.num_states.checked_mul(self.num_actions).is_none() {
            return Err(Error::config(format!(
                "table of {} x {} entries is too large",
                self.num_states, self.num_actions
            )));
        }
        check_unit("alpha", self.alpha)?;
        check_unit("gamma", self.gamma)?;
        check_unit("exploration_rate", self.exploration_rate)?;
        check_unit("exploration_decay", self.exploration_decay)?;
        Ok(())
    }

    /// Parses a configuration from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// NaN fails the range check as well.
fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}
