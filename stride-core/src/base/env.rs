//! Environment.
use super::{Act, Discrete, Obs, Step};
use crate::Info;
use anyhow::Result;

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Returns the descriptor of the action space.
    fn action_space(&self) -> Discrete;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation with its info.
    fn reset(&mut self) -> Result<(Self::Obs, Info<Self::Obs>)>;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent.
    fn reset_with_index(&mut self, ix: usize) -> Result<(Self::Obs, Info<Self::Obs>)>;

    /// Releases resources held by the environment. Does nothing in the default implementation.
    fn close(&mut self) {}
}
