//! Empirical transition counts for the world model.

use crate::random::RandomSource;
use crate::types::{StateActionPair, StateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistics for transitions out of a single state-action pair.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionStats {
    /// `(next_state, count)` in the order each next state was first seen.
    pub next_states: Vec<(StateId, u64)>,
    /// The total number of times this pair has been observed.
    pub total_count: u64,
}

impl TransitionStats {
    fn record(&mut self, next_state: StateId) {
        match self.next_states.iter_mut().find(|(s, _)| *s == next_state) {
            Some((_, count)) => *count += 1,
            None => self.next_states.push((next_state, 1)),
        }
        self.total_count += 1;
    }

    /// Draws a next state with probability proportional to its count.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<StateId> {
        if self.total_count == 0 {
            return None;
        }
        let mut remaining = rng.index(self.total_count as usize) as u64;
        for &(state, count) in &self.next_states {
            if remaining < count {
                return Some(state);
            }
            remaining -= count;
        }
        None
    }
}

/// Counts of observed `(state, action) → next_state` transitions.
///
/// Pairs are kept in first-observation order so that uniform sampling over
/// observed pairs is reproducible under a seeded random source. The model
/// only grows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionModel {
    pairs: Vec<StateActionPair>,
    transitions: HashMap<StateActionPair, TransitionStats>,
}

impl TransitionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed transition.
    pub fn record(&mut self, pair: StateActionPair, next_state: StateId) {
        if !self.transitions.contains_key(&pair) {
            self.pairs.push(pair);
        }
        self.transitions.entry(pair).or_default().record(next_state);
    }

    /// Returns the statistics for `pair`, if it has been observed.
    pub fn stats(&self, pair: StateActionPair) -> Option<&TransitionStats> {
        self.transitions.get(&pair)
    }

    /// Returns how often `pair` has been observed.
    pub fn count(&self, pair: StateActionPair) -> u64 {
        self.stats(pair).map(|s| s.total_count).unwrap_or(0)
    }

    /// Returns how often `pair` led to `next_state`.
    pub fn transition_count(&self, pair: StateActionPair, next_state: StateId) -> u64 {
        self.stats(pair)
            .and_then(|s| s.next_states.iter().find(|(n, _)| *n == next_state))
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Returns the empirical next-state distribution of `pair`.
    pub fn transition_probs(&self, pair: StateActionPair) -> HashMap<StateId, f64> {
        self.stats(pair)
            .map(|stats| {
                stats
                    .next_states
                    .iter()
                    .map(|&(s, count)| (s, count as f64 / stats.total_count as f64))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the most frequently observed next state of `pair`.
    /// Ties go to the state seen first.
    pub fn most_likely(&self, pair: StateActionPair) -> Option<StateId> {
        let stats = self.stats(pair)?;
        let mut best: Option<(StateId, u64)> = None;
        for &(state, count) in &stats.next_states {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((state, count));
            }
        }
        best.map(|(s, _)| s)
    }

    /// Returns the observed pairs in first-observation order.
    pub fn observed_pairs(&self) -> &[StateActionPair] {
        &self.pairs
    }

    /// Returns the number of distinct observed pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Draws an observed pair uniformly, then a next state from its
    /// empirical distribution. Returns `None` while nothing is recorded.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<(StateActionPair, StateId)> {
        if self.pairs.is_empty() {
            return None;
        }
        let pair = self.pairs[rng.index(self.pairs.len())];
        let next_state = self.transitions.get(&pair)?.sample(rng)?;
        Some((pair, next_state))
    }
}
