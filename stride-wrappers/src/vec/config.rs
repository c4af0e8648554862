//! Configuration of [`VecActionRepeat`](super::VecActionRepeat).
use crate::{repeat::default_info_key, RepeatSchedule};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

fn default_copy() -> bool {
    true
}

/// Constructs [`VecActionRepeat`](super::VecActionRepeat).
///
/// `C` is the configuration of each wrapped environment.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct VecActionRepeatConfig<C> {
    /// Configuration of the wrapped environments.
    pub env_config: C,

    /// The number of environments.
    pub n_envs: usize,

    /// Repeat schedule, shared by all environments.
    pub repeats: RepeatSchedule,

    /// Reserved info key.
    #[serde(default = "default_info_key")]
    pub info_key: String,

    /// If `true`, observations are copied out of the batch buffer at every step.
    #[serde(default = "default_copy")]
    pub copy: bool,
}

impl<C: Default> Default for VecActionRepeatConfig<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> VecActionRepeatConfig<C> {
    /// Constructs a configuration of a single environment with the given configuration.
    pub fn new(env_config: C) -> Self {
        Self {
            env_config,
            n_envs: 1,
            repeats: RepeatSchedule::default(),
            info_key: default_info_key(),
            copy: default_copy(),
        }
    }

    /// Sets the number of environments.
    pub fn n_envs(mut self, v: usize) -> Self {
        self.n_envs = v;
        self
    }

    /// Sets the repeat schedule.
    pub fn repeats(mut self, v: RepeatSchedule) -> Self {
        self.repeats = v;
        self
    }

    /// Sets the reserved info key.
    pub fn info_key(mut self, v: impl Into<String>) -> Self {
        self.info_key = v.into();
        self
    }

    /// Sets whether observations are copied at every step.
    pub fn copy(mut self, v: bool) -> Self {
        self.copy = v;
        self
    }
}

impl<C: DeserializeOwned> VecActionRepeatConfig<C> {
    /// Constructs [`VecActionRepeatConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }
}

impl<C: Serialize> VecActionRepeatConfig<C> {
    /// Saves [`VecActionRepeatConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
