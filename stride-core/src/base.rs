//! Core functionalities.
mod env;
mod space;
mod step;
pub use env::Env;
pub use space::Discrete;
use std::fmt::Debug;
pub use step::Step;

/// An observation of an environment.
///
/// Wrappers keep copies of intermediate observations in the info of a step,
/// hence `Clone`.
pub trait Obs: Clone + Debug {}

impl<T: Clone + Debug> Obs for T {}

/// A discrete action of an environment.
pub trait Act: Clone + Debug {
    /// Constructs an action from its index in the action space.
    fn from_index(ix: usize) -> Self;

    /// Returns the index of the action in the action space.
    fn index(&self) -> usize;
}

impl Act for usize {
    fn from_index(ix: usize) -> Self {
        ix
    }

    fn index(&self) -> usize {
        *self
    }
}

impl Act for i64 {
    fn from_index(ix: usize) -> Self {
        ix as _
    }

    fn index(&self) -> usize {
        *self as _
    }
}
