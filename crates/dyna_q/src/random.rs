//! Injectable source of randomness for exploration and planning.
//!
//! Every random draw the learner makes goes through [`RandomSource`], so a
//! seeded generator (or a scripted one in tests) makes runs exactly
//! reproducible.

use rand::Rng;

/// The random draws the learner needs.
pub trait RandomSource {
    /// Returns a sample uniformly distributed in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns an index uniformly distributed in `[0, upper)`.
    ///
    /// `upper` is always non-zero when called by this crate.
    fn index(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}
