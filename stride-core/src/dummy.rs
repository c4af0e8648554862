//! A deterministic environment used for tests and demos.
use crate::{Discrete, Env, Info, InfoValue, Step};
use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

/// Configuration of [`CountingEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingEnvConfig {
    /// The number of actions.
    pub n_actions: usize,

    /// Rewards of consecutive steps, cycled.
    pub rewards: Vec<f32>,

    /// Episode length. `None` for episodes that never end.
    pub horizon: Option<usize>,

    /// If `true`, the end of an episode is reported as truncation, otherwise as termination.
    pub truncate: bool,

    /// A key inserted into the info of every step.
    pub info_key: Option<String>,
}

impl Default for CountingEnvConfig {
    fn default() -> Self {
        Self {
            n_actions: 2,
            rewards: vec![1.0],
            horizon: None,
            truncate: false,
            info_key: None,
        }
    }
}

impl CountingEnvConfig {
    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the reward sequence.
    pub fn rewards(mut self, v: Vec<f32>) -> Self {
        self.rewards = v;
        self
    }

    /// Sets the episode length.
    pub fn horizon(mut self, v: Option<usize>) -> Self {
        self.horizon = v;
        self
    }

    /// Reports the end of episodes as truncation.
    pub fn truncate(mut self, v: bool) -> Self {
        self.truncate = v;
        self
    }

    /// Sets a key inserted into the info of every step.
    pub fn info_key(mut self, v: Option<String>) -> Self {
        self.info_key = v;
        self
    }
}

/// An environment counting its steps.
///
/// The observation is `[t, a]`, where `t` is the number of steps since the last reset
/// and `a` is the index of the last action. The reward of the `t`-th step is
/// `rewards[(t - 1) % rewards.len()]`. The info of a step holds `t` under the key `"t"`.
pub struct CountingEnv {
    config: CountingEnvConfig,
    seed: i64,
    t: usize,
    n_calls: usize,
    n_resets: usize,
    closed: bool,
}

impl CountingEnv {
    /// The number of calls of [`Env::step`] since the environment was built.
    pub fn n_calls(&self) -> usize {
        self.n_calls
    }

    /// The number of resets since the environment was built.
    pub fn n_resets(&self) -> usize {
        self.n_resets
    }

    /// `true` after [`Env::close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of steps since the last reset.
    pub fn t(&self) -> usize {
        self.t
    }

    fn reset_info(&self) -> Info<Vec<f32>> {
        let mut info = Info::empty();
        info.insert("seed", InfoValue::Int(self.seed));
        info
    }
}

impl Env for CountingEnv {
    type Config = CountingEnvConfig;
    type Obs = Vec<f32>;
    type Act = usize;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            seed,
            t: 0,
            n_calls: 0,
            n_resets: 0,
            closed: false,
        })
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(self.config.n_actions)
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        trace!("CountingEnv::step({})", a);
        self.t += 1;
        self.n_calls += 1;

        let rewards = &self.config.rewards;
        let reward = if rewards.is_empty() {
            0.0
        } else {
            rewards[(self.t - 1) % rewards.len()]
        };
        let done = matches!(self.config.horizon, Some(h) if self.t >= h);
        let (is_terminated, is_truncated) = match (done, self.config.truncate) {
            (false, _) => (false, false),
            (true, false) => (true, false),
            (true, true) => (false, true),
        };

        let mut info = Info::empty();
        info.insert("t", InfoValue::Int(self.t as i64));
        if let Some(key) = self.config.info_key.as_ref() {
            info.insert(key.as_str(), InfoValue::Bool(true));
        }

        let obs = vec![self.t as f32, *a as f32];
        Ok(Step::new(obs, reward, is_terminated, is_truncated, info))
    }

    fn reset(&mut self) -> Result<(Self::Obs, Info<Self::Obs>)> {
        trace!("CountingEnv::reset()");
        self.t = 0;
        self.n_resets += 1;
        Ok((vec![0.0, 0.0], self.reset_info()))
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<(Self::Obs, Info<Self::Obs>)> {
        let (obs, mut info) = self.reset()?;
        info.insert("index", InfoValue::Int(ix as i64));
        Ok((obs, info))
    }

    fn close(&mut self) {
        trace!("CountingEnv::close()");
        self.closed = true;
    }
}
