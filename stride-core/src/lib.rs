#![warn(missing_docs)]
//! Core abstractions of stride.
//!
//! This crate defines the environment interface consumed and re-exposed by the
//! wrappers in `stride-wrappers`:
//!
//! * [`Env`] - a stateful environment advanced by discrete [`Env::step`] calls
//! * [`Step`] - the transition emitted by a single call to [`Env::step`]
//! * [`Info`] - the auxiliary info mapping returned alongside observations
//! * [`Discrete`] - the descriptor of a discrete action space
//!
//! [`dummy::CountingEnv`] is a small deterministic environment used in tests
//! and demos.
pub mod dummy;
pub mod error;
pub mod info;

mod base;
pub use base::{Act, Discrete, Env, Obs, Step};
pub use error::StrideError;
pub use info::{Info, InfoValue, Transition};
