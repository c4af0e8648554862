#![warn(missing_docs)]
//! Action-repeat wrappers.
//!
//! [`ActionRepeat`] wraps an environment implementing [`Env`](stride_core::Env) so that a
//! single call of `step` repeats the action for a number of inner steps, sums the rewards
//! and returns one aggregated [`Step`](stride_core::Step). The repeat count is given by a
//! [`RepeatSchedule`]: either a fixed count, or a list of choices decoded from the action
//! index, in which case the action space exposed by the wrapper is the wrapped one
//! multiplied by the number of choices.
//!
//! The observations and rewards of the inner steps are reported in the info of the
//! aggregated step under a reserved key (`"repeats"` by default):
//!
//! ```text
//! info["repeats"] = { "prev_steps": [(obs, reward), ...], "num_steps": n }
//! ```
//!
//! The transitions include the inner step that ended the episode, if any, so that
//! `prev_steps.len() == num_steps` always holds.
//!
//! [`VecActionRepeat`] applies the same logic independently to every environment of a batch
//! and resets the environments whose episodes ended, keeping the pre-reset observation and
//! info under `"final_observation"` and `"final_info"`.
mod repeat;
mod schedule;
mod vec;
pub use repeat::{ActionRepeat, ActionRepeatConfig};
pub use schedule::RepeatSchedule;
pub use vec::{BatchInfo, VecActionRepeat, VecActionRepeatConfig, VecStep};

/// The default reserved info key.
pub const DEFAULT_INFO_KEY: &str = "repeats";

/// Key of the transitions of the inner steps in the reserved info.
pub const PREV_STEPS_KEY: &str = "prev_steps";

/// Key of the number of the inner steps in the reserved info.
pub const NUM_STEPS_KEY: &str = "num_steps";

/// Key of the observation before an automatic reset.
pub const FINAL_OBSERVATION_KEY: &str = "final_observation";

/// Key of the info before an automatic reset.
pub const FINAL_INFO_KEY: &str = "final_info";
