//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum StrideError {
    /// Info key error.
    #[error("Info key error: {0}")]
    InfoKeyError(String),

    /// Info value type error.
    #[error("Info value type error: expected {0}")]
    InfoValueTypeError(String),

    /// The reserved key of a wrapper was already present in the info of the wrapped environment.
    #[error("Reserved info key `{0}` is already used by the wrapped environment")]
    ReservedInfoKey(String),

    /// Malformed repeat schedule.
    #[error("Invalid repeat schedule: {0}")]
    InvalidSchedule(String),

    /// Action outside of the action space.
    #[error("Action {action} is out of the action space of {n} actions")]
    InvalidAction {
        /// Index of the action.
        action: usize,
        /// Cardinality of the action space.
        n: usize,
    },

    /// The wrapped environment has no action.
    #[error("Action space of the wrapped environment is empty")]
    EmptyActionSpace,

    /// The number of actions does not match the number of environments.
    #[error("Expected {expected} actions, got {actual}")]
    BatchSizeMismatch {
        /// The number of environments.
        expected: usize,
        /// The number of given actions.
        actual: usize,
    },

    /// A vectorized environment without any environment.
    #[error("Vectorized environment requires at least one environment")]
    EmptyBatch,
}
