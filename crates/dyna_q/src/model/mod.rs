//! The learned world model used for Dyna-Q planning.
//!
//! The model combines empirical transition counts with a running reward
//! estimate. Sampling it yields synthetic transitions that the learner
//! replays as if they were real experience.

pub mod reward;
pub mod transition;

pub use reward::RewardModel;
pub use transition::{TransitionModel, TransitionStats};

use crate::error::Result;
use crate::random::RandomSource;
use crate::types::{StateActionPair, Transition};
use serde::{Deserialize, Serialize};

/// Transition counts plus reward estimates for every observed pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldModel {
    transitions: TransitionModel,
    rewards: RewardModel,
}

impl WorldModel {
    /// Creates an empty model. `reward_rate` is the smoothing rate of the
    /// reward estimate.
    pub fn new(num_states: usize, num_actions: usize, reward_rate: f64) -> Self {
        Self {
            transitions: TransitionModel::new(),
            rewards: RewardModel::new(num_states, num_actions, reward_rate),
        }
    }

    /// Folds one real transition into the model.
    pub fn integrate(&mut self, transition: &Transition) -> Result<()> {
        let pair = transition.pair();
        // Validates the indices before the counts grow.
        self.rewards.update(pair, transition.reward)?;
        self.transitions.record(pair, transition.next_state);
        Ok(())
    }

    /// Synthesizes a transition from an observed pair, or `None` while the
    /// model is empty.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Transition> {
        let (pair, next_state) = self.transitions.sample(rng)?;
        let reward = self.rewards.get(pair).ok()?;
        Some(Transition::new(pair.state, pair.action, next_state, reward))
    }

    pub fn transitions(&self) -> &TransitionModel {
        &self.transitions
    }

    pub fn rewards(&self) -> &RewardModel {
        &self.rewards
    }

    /// Returns how often `pair` has been integrated.
    pub fn count(&self, pair: StateActionPair) -> u64 {
        self.transitions.count(pair)
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_integrate() {
        let mut model = WorldModel::new(3, 2, 0.5);
        model.integrate(&Transition::new(0, 1, 2, 4.0)).unwrap();
        model.integrate(&Transition::new(0, 1, 2, 0.0)).unwrap();

        let pair = StateActionPair::new(0, 1);
        assert_eq!(model.count(pair), 2);
        assert_eq!(model.rewards().get(pair).unwrap(), 1.0);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_integrate_rejects_bad_state() {
        let mut model = WorldModel::new(3, 2, 0.5);
        assert!(model.integrate(&Transition::new(3, 0, 0, 1.0)).is_err());
        assert!(model.is_empty());
    }

    #[test]
    fn test_sample_uses_modeled_reward() {
        let mut model = WorldModel::new(3, 2, 1.0);
        model.integrate(&Transition::new(1, 0, 2, 6.0)).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let t = model.sample(&mut rng).unwrap();
        assert_eq!(t, Transition::new(1, 0, 2, 6.0));
    }

    #[test]
    fn test_sample_empty() {
        let model = WorldModel::new(3, 2, 0.5);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(model.sample(&mut rng).is_none());
    }
}
