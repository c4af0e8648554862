//! Action-repeat wrapper of a single environment.
mod base;
mod config;
pub use base::ActionRepeat;
pub(crate) use base::repeat_step;
pub use config::ActionRepeatConfig;
pub(crate) use config::default_info_key;
