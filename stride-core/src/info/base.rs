//! Base implementation of the info mapping.
use crate::error::StrideError;
use std::collections::{hash_map::IntoIter, HashMap};

/// An observation and reward pair produced by a single inner step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<O> {
    /// Observation after the step.
    pub obs: O,

    /// Reward of the step.
    pub reward: f32,
}

impl<O> Transition<O> {
    /// Constructs a transition.
    pub fn new(obs: O, reward: f32) -> Self {
        Self { obs, reward }
    }
}

/// Represents possible types of values that can be stored in an [`Info`].
///
/// `O` is the observation type of the environment emitting the info.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue<O> {
    /// A single floating-point value.
    Scalar(f32),

    /// An integer, e.g., a counter.
    Int(i64),

    /// A flag.
    Bool(bool),

    /// A text value.
    String(String),

    /// An observation of the environment.
    Obs(O),

    /// A sequence of transitions in the order they were produced.
    Transitions(Vec<Transition<O>>),

    /// A nested mapping.
    Info(Info<O>),
}

/// A container for storing key-value pairs of auxiliary information.
#[derive(Debug, Clone, PartialEq)]
pub struct Info<O>(HashMap<String, InfoValue<O>>);

impl<O> Default for Info<O> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<O> Info<O> {
    /// Creates an empty info.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates an info containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), InfoValue::Scalar(value))]))
    }

    /// Inserts a key-value pair, returning the previous value of the key if any.
    pub fn insert(&mut self, k: impl Into<String>, v: InfoValue<O>) -> Option<InfoValue<O>> {
        self.0.insert(k.into(), v)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, k: &str) -> bool {
        self.0.contains_key(k)
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&InfoValue<O>> {
        self.0.get(k)
    }

    /// The number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the info is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges two infos, consuming both.
    ///
    /// If both contain the same key, the value from `info` wins.
    pub fn merge(self, info: Info<O>) -> Self {
        Info(self.0.into_iter().chain(info.0).collect())
    }

    fn lookup(&self, k: &str) -> Result<&InfoValue<O>, StrideError> {
        self.0
            .get(k)
            .ok_or_else(|| StrideError::InfoKeyError(k.to_string()))
    }

    /// Gets a scalar value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, StrideError> {
        match self.lookup(k)? {
            InfoValue::Scalar(v) => Ok(*v),
            _ => Err(StrideError::InfoValueTypeError("Scalar".to_string())),
        }
    }

    /// Gets an integer value.
    pub fn get_int(&self, k: &str) -> Result<i64, StrideError> {
        match self.lookup(k)? {
            InfoValue::Int(v) => Ok(*v),
            _ => Err(StrideError::InfoValueTypeError("Int".to_string())),
        }
    }

    /// Gets a flag.
    pub fn get_bool(&self, k: &str) -> Result<bool, StrideError> {
        match self.lookup(k)? {
            InfoValue::Bool(v) => Ok(*v),
            _ => Err(StrideError::InfoValueTypeError("Bool".to_string())),
        }
    }

    /// Gets a string value.
    pub fn get_string(&self, k: &str) -> Result<&str, StrideError> {
        match self.lookup(k)? {
            InfoValue::String(s) => Ok(s),
            _ => Err(StrideError::InfoValueTypeError("String".to_string())),
        }
    }

    /// Gets an observation.
    pub fn get_obs(&self, k: &str) -> Result<&O, StrideError> {
        match self.lookup(k)? {
            InfoValue::Obs(o) => Ok(o),
            _ => Err(StrideError::InfoValueTypeError("Obs".to_string())),
        }
    }

    /// Gets a sequence of transitions.
    pub fn get_transitions(&self, k: &str) -> Result<&[Transition<O>], StrideError> {
        match self.lookup(k)? {
            InfoValue::Transitions(v) => Ok(v),
            _ => Err(StrideError::InfoValueTypeError("Transitions".to_string())),
        }
    }

    /// Gets a nested info.
    pub fn get_info(&self, k: &str) -> Result<&Info<O>, StrideError> {
        match self.lookup(k)? {
            InfoValue::Info(i) => Ok(i),
            _ => Err(StrideError::InfoValueTypeError("Info".to_string())),
        }
    }
}

impl<O> IntoIterator for Info<O> {
    type Item = (String, InfoValue<O>);
    type IntoIter = IntoIter<String, InfoValue<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<O> FromIterator<(String, InfoValue<O>)> for Info<O> {
    fn from_iter<T: IntoIterator<Item = (String, InfoValue<O>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
