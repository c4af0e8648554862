//! Discrete action space.
use serde::{Deserialize, Serialize};

/// Descriptor of a discrete action space `{0, 1, ..., n - 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    /// Constructs a space of `n` actions.
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// The number of actions.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns `true` if `ix` is a valid action index.
    pub fn contains(&self, ix: usize) -> bool {
        ix < self.n
    }

    /// Samples an action index uniformly.
    ///
    /// Panics if the space is empty.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> usize {
        rng.usize(..self.n)
    }

    /// Returns a new space where each action is paired with one of `m` choices.
    ///
    /// The original space is left untouched.
    pub fn expand(&self, m: usize) -> Self {
        Self { n: self.n * m }
    }
}
