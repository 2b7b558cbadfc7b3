#![doc = include_str!("../README.md")]
//! # Dyna-Q - Tabular Q-learning with model-based planning
//!
//! A reinforcement-learning agent for discrete, finite state and action
//! spaces. It keeps an estimate of the expected discounted return of every
//! `(state, action)` pair and refines it online from the transitions an
//! external environment reports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        QLearner                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐   │
//! │  │ EpsilonGreedy│  │   Learning   │  │   WorldModel     │   │
//! │  │              │◄─│    Engine    │◄─│                  │   │
//! │  │ • explore    │  │              │  │ • T(s,a,s') cnt  │   │
//! │  │ • exploit    │  │ • QTable     │  │ • R(s,a) EMA     │   │
//! │  │ • decay      │  │ • TD update  │  │ • sampling       │   │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘   │
//! │                                                             │
//! │          every random draw goes through RandomSource        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dyna_q::{LearnerConfig, QLearner};
//!
//! let config = LearnerConfig::new(4, 2)
//!     .with_alpha(0.5)
//!     .with_gamma(0.9)
//!     .with_exploration(0.0, 0.99);
//! let mut learner = QLearner::seeded(config, 42).unwrap();
//!
//! // Start an episode in state 0.
//! let action = learner.seed_state(0).unwrap();
//! assert_eq!(action, 0);
//!
//! // The environment moved us to state 1 with reward 10.
//! let _next_action = learner.step(1, 10.0).unwrap();
//! assert_eq!(learner.q_value(0, 0).unwrap(), 5.0);
//! ```
//!
//! ### Dyna-Q
//!
//! ```rust
//! use dyna_q::{LearnerConfig, QLearner};
//!
//! let mut learner = QLearner::new(LearnerConfig::dyna_mode(16, 4)).unwrap();
//! learner.seed_state(0).unwrap();
//! learner.step(1, -1.0).unwrap();
//! assert_eq!(learner.stats().planning_updates, 200);
//! ```

pub mod config;
pub mod error;
pub mod learner;
pub mod learning;
pub mod model;
pub mod policy;
pub mod random;
pub mod types;

pub use config::LearnerConfig;
pub use error::{Error, Result};
pub use learner::{LearnerStats, QLearner};
pub use learning::{LearningConfig, LearningEngine, QTable};
pub use model::{RewardModel, TransitionModel, TransitionStats, WorldModel};
pub use policy::{EpsilonGreedy, Selection};
pub use random::RandomSource;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a learner with the default parameters for the given space.
///
/// # Examples
///
/// ```
/// use dyna_q::create_learner;
///
/// let learner = create_learner(25, 4).unwrap();
/// assert_eq!(learner.q_table().num_states(), 25);
/// assert_eq!(learner.config().planning_steps, 0);
/// ```
pub fn create_learner(num_states: usize, num_actions: usize) -> Result<QLearner> {
    QLearner::new(LearnerConfig::new(num_states, num_actions))
}

/// Creates a learner with Dyna-Q planning enabled (200 planning updates per step).
///
/// # Examples
///
/// ```
/// use dyna_q::create_dyna_learner;
///
/// let learner = create_dyna_learner(25, 4).unwrap();
/// assert!(learner.config().planning_enabled());
/// ```
pub fn create_dyna_learner(num_states: usize, num_actions: usize) -> Result<QLearner> {
    QLearner::new(LearnerConfig::dyna_mode(num_states, num_actions))
}
