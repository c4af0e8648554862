//! Configuration of [`ActionRepeat`](super::ActionRepeat).
use crate::{RepeatSchedule, DEFAULT_INFO_KEY};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

pub(crate) fn default_info_key() -> String {
    DEFAULT_INFO_KEY.to_string()
}

/// Configuration of [`ActionRepeat`](super::ActionRepeat).
///
/// `C` is the configuration of the wrapped environment.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ActionRepeatConfig<C> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// Repeat schedule.
    pub repeats: RepeatSchedule,

    /// Reserved info key.
    #[serde(default = "default_info_key")]
    pub info_key: String,
}

impl<C: Default> Default for ActionRepeatConfig<C> {
    fn default() -> Self {
        Self {
            env_config: C::default(),
            repeats: RepeatSchedule::default(),
            info_key: default_info_key(),
        }
    }
}

impl<C> ActionRepeatConfig<C> {
    /// Constructs a configuration wrapping the given environment configuration.
    pub fn new(env_config: C) -> Self {
        Self {
            env_config,
            repeats: RepeatSchedule::default(),
            info_key: default_info_key(),
        }
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
}

impl<C: DeserializeOwned> ActionRepeatConfig<C> {
    /// Constructs [`ActionRepeatConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }
}

impl<C: Serialize> ActionRepeatConfig<C> {
    /// Saves [`ActionRepeatConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::dummy::CountingEnvConfig;
    use tempdir::TempDir;

    #[test]
    fn test_serde_action_repeat_config() -> Result<()> {
        let config = ActionRepeatConfig::new(CountingEnvConfig::default().horizon(Some(10)))
            .repeats(RepeatSchedule::Choices(vec![1, 4]))
            .info_key("batch");

        let dir = TempDir::new("action_repeat_config")?;
        let path = dir.path().join("action_repeat.yaml");
        config.save(&path)?;
        let config_ = ActionRepeatConfig::<CountingEnvConfig>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_info_key_defaults_to_repeats() -> Result<()> {
        let yaml = "\
env_config:
  n_actions: 3
  rewards: [1.0]
  horizon: ~
  truncate: false
  info_key: ~
repeats: 4
";
        let config: ActionRepeatConfig<CountingEnvConfig> = serde_yaml::from_str(yaml)?;
        assert_eq!(config.repeats, RepeatSchedule::Fixed(4));
        assert_eq!(config.info_key, "repeats");
        assert_eq!(config.env_config.n_actions, 3);
        Ok(())
    }
}
