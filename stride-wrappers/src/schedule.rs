//! Repeat schedule.
use serde::{Deserialize, Serialize};
use stride_core::{Discrete, StrideError};

/// Rule mapping an action index to a base action and a repeat count.
///
/// In YAML, `repeats: 4` is a fixed count and `repeats: [1, 4]` a list of choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepeatSchedule {
    /// Every action is repeated the given number of times.
    Fixed(usize),

    /// The repeat count is chosen by the action.
    ///
    /// Action `a` is decoded into base action `a / choices.len()`
    /// repeated `choices[a % choices.len()]` times, i.e., the actions are ordered as
    /// `[(a0, c0), (a0, c1), ..., (a1, c0), (a1, c1), ...]`.
    Choices(Vec<usize>),
}

impl Default for RepeatSchedule {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl RepeatSchedule {
    /// Checks that the schedule has at least one choice and that all repeat counts are positive.
    pub fn validate(&self) -> Result<(), StrideError> {
        match self {
            Self::Fixed(0) => Err(StrideError::InvalidSchedule(
                "repeat count must be positive".to_string(),
            )),
            Self::Fixed(_) => Ok(()),
            Self::Choices(c) if c.is_empty() => Err(StrideError::InvalidSchedule(
                "list of repeat counts is empty".to_string(),
            )),
            Self::Choices(c) => match c.iter().position(|&k| k == 0) {
                Some(i) => Err(StrideError::InvalidSchedule(format!(
                    "repeat count at position {} must be positive",
                    i
                ))),
                None => Ok(()),
            },
        }
    }

    /// Derives the action space exposed by a wrapper from the wrapped one.
    pub fn action_space(&self, base: Discrete) -> Discrete {
        match self {
            Self::Fixed(_) => base,
            Self::Choices(c) => base.expand(c.len()),
        }
    }

    /// Decodes an action index into `(base_action, repeat_count)`.
    ///
    /// The schedule is assumed to be valid.
    pub fn decode(&self, action: usize) -> (usize, usize) {
        match self {
            Self::Fixed(k) => (action, *k),
            Self::Choices(c) => (action / c.len(), c[action % c.len()]),
        }
    }

    /// Encodes a base action and the index of a repeat choice into an action index.
    ///
    /// Inverse of [`RepeatSchedule::decode`]. `choice` is ignored for a fixed schedule.
    pub fn encode(&self, base_action: usize, choice: usize) -> usize {
        match self {
            Self::Fixed(_) => base_action,
            Self::Choices(c) => base_action * c.len() + choice,
        }
    }
}
