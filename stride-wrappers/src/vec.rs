//! Action-repeat wrapper of a batch of environments.
mod base;
mod batch_info;
mod config;
pub use base::{VecActionRepeat, VecStep};
pub use batch_info::BatchInfo;
pub use config::VecActionRepeatConfig;
