//! Learning module for the Dyna-Q learner.
//!
//! Holds the value store ([`QTable`]) and the engine that applies the
//! one-step Q-learning update to it:
//!
//! ```text
//! Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dyna_q::learning::{LearningConfig, LearningEngine};
//! use dyna_q::Transition;
//!
//! let mut engine = LearningEngine::new(
//!     4,
//!     2,
//!     LearningConfig {
//!         learning_rate: 0.5,
//!         discount_factor: 0.9,
//!     },
//! );
//!
//! engine.update(&Transition::new(0, 0, 1, 10.0)).unwrap();
//! assert_eq!(engine.q_value(0, 0).unwrap(), 5.0);
//! assert_eq!(engine.q_table().best_action(0).unwrap(), 0);
//! ```

pub mod engine;
pub mod q_table;

pub use engine::{LearningConfig, LearningEngine};
pub use q_table::QTable;
