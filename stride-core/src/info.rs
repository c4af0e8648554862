//! Auxiliary information returned alongside observations.
//!
//! [`Info`] is a mapping from string keys to [`InfoValue`]s, the side channel of
//! every [`Step`](crate::Step) and of [`Env::reset`](crate::Env::reset).
//! Wrappers enrich it under reserved keys, for example with the intermediate
//! transitions discarded by an action-repeat wrapper.
//!
//! # Basic Usage
//!
//! ```rust
//! use stride_core::{Info, InfoValue};
//!
//! let mut info = Info::<Vec<f32>>::empty();
//! info.insert("lives", InfoValue::Int(3));
//! info.insert("score", InfoValue::Scalar(-1.0));
//! assert_eq!(info.get_int("lives").unwrap(), 3);
//! ```
mod base;

pub use base::{Info, InfoValue, Transition};
