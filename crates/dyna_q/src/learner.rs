//! The Q-learning agent with optional Dyna-Q planning.
//!
//! ## Control flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         QLearner                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  seed_state(s) ──► EpsilonGreedy ──► memory = (s, a)        │
//! │                                                             │
//! │  step(s', r)                                                │
//! │    1. LearningEngine: Q(s,a) update from (s, a, s', r)      │
//! │    2. WorldModel: integrate, then `planning_steps`          │
//! │       synthetic updates          (only if planning > 0)     │
//! │    3. EpsilonGreedy on s'  ──► memory = (s', a')            │
//! │    4. exploration rate *= decay                             │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::config::LearnerConfig;
use crate::error::Result;
use crate::learning::{LearningConfig, LearningEngine, QTable};
use crate::model::WorldModel;
use crate::policy::{EpsilonGreedy, Selection};
use crate::random::RandomSource;
use crate::types::{ActionId, StateActionPair, StateId, Transition};
use rand::rngs::{StdRng, ThreadRng};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Collects statistics for monitoring a learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerStats {
    /// The number of `step` calls that completed.
    pub steps: u64,
    /// The number of passive selections made through `seed_state`.
    pub seeds: u64,
    /// The number of value updates driven by real transitions.
    pub real_updates: u64,
    /// The number of value updates driven by the world model.
    pub planning_updates: u64,
    /// The number of selections that explored.
    pub random_actions: u64,
    /// The number of selections that exploited.
    pub greedy_actions: u64,
    /// The exploration rate after the latest step.
    pub exploration_rate: f64,
    /// The sum of all rewards passed to `step`.
    pub total_reward: f64,
}

/// A tabular Q-learning agent.
///
/// Generic over its [`RandomSource`] so runs can be made reproducible by
/// supplying a seeded generator.
#[derive(Debug, Clone)]
pub struct QLearner<R = ThreadRng> {
    config: LearnerConfig,
    engine: LearningEngine,
    policy: EpsilonGreedy,
    model: WorldModel,
    memory: StateActionPair,
    stats: LearnerStats,
    rng: R,
}

impl QLearner<ThreadRng> {
    /// Creates a learner drawing from the thread-local generator.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        Self::with_rng(config, rand::rng())
    }
}

impl QLearner<StdRng> {
    /// Creates a learner whose random draws are fully determined by `seed`.
    pub fn seeded(config: LearnerConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> QLearner<R> {
    /// Creates a learner drawing from `rng`.
    ///
    /// Fails with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if any parameter is out of range.
    pub fn with_rng(config: LearnerConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let engine = LearningEngine::new(
            config.num_states,
            config.num_actions,
            LearningConfig::from(&config),
        );
        let policy = EpsilonGreedy::new(config.exploration_rate, config.exploration_decay);
        let model = WorldModel::new(config.num_states, config.num_actions, config.alpha);
        let stats = LearnerStats {
            exploration_rate: config.exploration_rate,
            ..Default::default()
        };

        Ok(Self {
            config,
            engine,
            policy,
            model,
            memory: StateActionPair::new(0, 0),
            stats,
            rng,
        })
    }

    /// Chooses an action for `state` without learning.
    ///
    /// The chosen pair becomes the agent's memory, so this is how an episode
    /// is started. It is also the way to run a frozen policy. The exploration
    /// rate is not decayed.
    pub fn seed_state(&mut self, state: StateId) -> Result<ActionId> {
        let selection = self.select(state)?;
        self.stats.seeds += 1;
        Ok(selection.action())
    }

    /// Learns from the outcome of the remembered action and chooses the next one.
    ///
    /// `next_state` and `reward` are the result of taking the remembered action
    /// in the remembered state. An out-of-range `next_state` fails before
    /// anything is modified.
    pub fn step(&mut self, next_state: StateId, reward: f64) -> Result<ActionId> {
        self.engine.q_table().check_state(next_state)?;

        let transition = Transition::new(
            self.memory.state,
            self.memory.action,
            next_state,
            reward,
        );
        self.engine.update(&transition)?;
        self.stats.real_updates += 1;

        if self.config.planning_enabled() {
            self.model.integrate(&transition)?;
            self.plan()?;
        }

        let selection = self.select(next_state)?;
        self.policy.decay();

        self.stats.steps += 1;
        self.stats.total_reward += reward;
        self.stats.exploration_rate = self.policy.rate();
        Ok(selection.action())
    }

    /// Replays `planning_steps` synthetic transitions drawn from the world model.
    ///
    /// Only the Q-table changes; memory, the exploration rate and the model
    /// itself are left as they are.
    fn plan(&mut self) -> Result<()> {
        let mut performed = 0;
        for _ in 0..self.config.planning_steps {
            let Some(synthetic) = self.model.sample(&mut self.rng) else {
                break;
            };
            self.engine.update(&synthetic)?;
            performed += 1;
        }
        self.stats.planning_updates += performed;

        if self.config.verbose {
            log::trace!(
                "planned {} updates over {} observed pairs",
                performed,
                self.model.transitions().len()
            );
        }
        Ok(())
    }

    fn select(&mut self, state: StateId) -> Result<Selection> {
        let selection = self
            .policy
            .select(self.engine.q_table(), state, &mut self.rng)?;
        self.memory = StateActionPair::new(state, selection.action());

        if selection.is_exploration() {
            self.stats.random_actions += 1;
        } else {
            self.stats.greedy_actions += 1;
        }
        if self.config.verbose {
            log::debug!("s = {} a = {}", state, selection.action());
        }
        Ok(selection)
    }

    /// Returns the greedy action for `state` without touching memory,
    /// the exploration rate or the random source.
    pub fn greedy_action(&self, state: StateId) -> Result<ActionId> {
        self.engine.q_table().best_action(state)
    }

    /// Returns the greedy action of every state.
    pub fn greedy_policy(&self) -> Vec<ActionId> {
        self.engine.q_table().greedy_policy()
    }

    /// Gets `Q[state, action]`.
    pub fn q_value(&self, state: StateId, action: ActionId) -> Result<f64> {
        self.engine.q_value(state, action)
    }

    pub fn q_table(&self) -> &QTable {
        self.engine.q_table()
    }

    pub fn engine(&self) -> &LearningEngine {
        &self.engine
    }

    /// Returns the remembered `(state, action)` pair the next `step` learns about.
    pub fn memory(&self) -> StateActionPair {
        self.memory
    }

    /// Returns the current exploration rate.
    pub fn exploration_rate(&self) -> f64 {
        self.policy.rate()
    }

    /// Returns the world model. It stays empty while planning is disabled.
    pub fn world_model(&self) -> &WorldModel {
        &self.model
    }

    pub fn stats(&self) -> &LearnerStats {
        &self.stats
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Forgets everything learned, returning to the freshly constructed state.
    /// The random source carries on from where it is.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.policy = EpsilonGreedy::new(
            self.config.exploration_rate,
            self.config.exploration_decay,
        );
        self.model = WorldModel::new(
            self.config.num_states,
            self.config.num_actions,
            self.config.alpha,
        );
        self.memory = StateActionPair::new(0, 0);
        self.stats = LearnerStats {
            exploration_rate: self.config.exploration_rate,
            ..Default::default()
        };
    }
}
