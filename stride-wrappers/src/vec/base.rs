use super::{BatchInfo, VecActionRepeatConfig};
use crate::{repeat::repeat_step, RepeatSchedule, FINAL_INFO_KEY, FINAL_OBSERVATION_KEY};
use anyhow::Result;
use log::{debug, trace};
use std::borrow::Cow;
use stride_core::{Act, Discrete, Env, InfoValue, Step, StrideError};

/// Aggregated steps of a batch of environments.
#[derive(Debug)]
pub struct VecStep<'a, O: Clone> {
    /// Observations, one per environment.
    ///
    /// Borrowed from the batch buffer of the wrapper unless it copies observations.
    pub obs: Cow<'a, [O]>,

    /// Accumulated rewards.
    pub reward: Vec<f32>,

    /// Flags denoting if episodes are terminated.
    pub is_terminated: Vec<bool>,

    /// Flags denoting if episodes are truncated.
    pub is_truncated: Vec<bool>,

    /// Info of all environments.
    pub info: BatchInfo<O>,
}

impl<'a, O: Clone> VecStep<'a, O> {
    /// Terminated or truncated, for each environment.
    pub fn is_done(&self) -> Vec<bool> {
        self.is_terminated
            .iter()
            .zip(self.is_truncated.iter())
            .map(|(&t, &u)| t || u)
            .collect()
    }
}

/// Repeats actions in a batch of environments.
///
/// Every environment is stepped with the same rule as
/// [`ActionRepeat`](crate::ActionRepeat). An environment whose episode ended is reset
/// immediately; its info then holds the info of the reset, with the observation and
/// the info of the last step under [`FINAL_OBSERVATION_KEY`] and [`FINAL_INFO_KEY`].
pub struct VecActionRepeat<E: Env> {
    envs: Vec<E>,
    schedule: RepeatSchedule,
    info_key: String,
    copy: bool,
    single_action_space: Discrete,
    observations: Vec<E::Obs>,
}

impl<E: Env> VecActionRepeat<E> {
    /// Wraps a batch of environments.
    ///
    /// The environments are assumed to share the same action space.
    pub fn new(
        envs: Vec<E>,
        schedule: RepeatSchedule,
        info_key: impl Into<String>,
        copy: bool,
    ) -> Result<Self> {
        if envs.is_empty() {
            return Err(StrideError::EmptyBatch.into());
        }
        schedule.validate()?;
        let base_action_space = envs[0].action_space();
        if base_action_space.n() == 0 {
            return Err(StrideError::EmptyActionSpace.into());
        }
        let single_action_space = schedule.action_space(base_action_space);

        Ok(Self {
            envs,
            schedule,
            info_key: info_key.into(),
            copy,
            single_action_space,
            observations: vec![],
        })
    }

    /// Builds `config.n_envs` environments, the `i`-th of them with seed `seed + i`.
    pub fn build(config: &VecActionRepeatConfig<E::Config>, seed: i64) -> Result<Self> {
        let envs = (0..config.n_envs)
            .map(|i| E::build(&config.env_config, seed + i as i64))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            envs,
            config.repeats.clone(),
            config.info_key.clone(),
            config.copy,
        )
    }

    /// The number of environments.
    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// The action space of each environment, as exposed by the wrapper.
    pub fn single_action_space(&self) -> Discrete {
        self.single_action_space
    }

    /// The repeat schedule.
    pub fn schedule(&self) -> &RepeatSchedule {
        &self.schedule
    }

    /// The wrapped environments.
    pub fn envs(&self) -> &[E] {
        &self.envs
    }

    fn observations(&self) -> Cow<'_, [E::Obs]> {
        if self.copy {
            Cow::Owned(self.observations.clone())
        } else {
            Cow::Borrowed(&self.observations)
        }
    }

    /// Resets all environments.
    pub fn reset(&mut self) -> Result<(Cow<'_, [E::Obs]>, BatchInfo<E::Obs>)> {
        trace!("VecActionRepeat::reset()");
        let mut observations = Vec::with_capacity(self.envs.len());
        let mut infos = BatchInfo::new(self.envs.len());

        for (i, env) in self.envs.iter_mut().enumerate() {
            let (obs, info) = env.reset()?;
            observations.push(obs);
            infos.add(i, info);
        }
        self.observations = observations;

        Ok((self.observations(), infos))
    }

    /// Applies one action to each environment.
    ///
    /// `actions[i]` is decoded with the repeat schedule and applied to the `i`-th environment.
    pub fn step(&mut self, actions: &[E::Act]) -> Result<VecStep<'_, E::Obs>> {
        trace!("VecActionRepeat::step()");
        let n = self.envs.len();
        if actions.len() != n {
            return Err(StrideError::BatchSizeMismatch {
                expected: n,
                actual: actions.len(),
            }
            .into());
        }
        if let Some(a) = actions
            .iter()
            .find(|a| !self.single_action_space.contains(a.index()))
        {
            return Err(StrideError::InvalidAction {
                action: a.index(),
                n: self.single_action_space.n(),
            }
            .into());
        }

        // No slot is reset until every slot has been stepped without error.
        let steps = self
            .envs
            .iter_mut()
            .zip(actions.iter())
            .map(|(env, a)| {
                let (base, repeats) = self.schedule.decode(a.index());
                repeat_step(env, &E::Act::from_index(base), repeats, &self.info_key)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut observations = Vec::with_capacity(n);
        let mut reward = Vec::with_capacity(n);
        let mut is_terminated = Vec::with_capacity(n);
        let mut is_truncated = Vec::with_capacity(n);
        let mut infos = BatchInfo::new(n);

        for (i, (env, step)) in self.envs.iter_mut().zip(steps).enumerate() {
            let Step {
                obs,
                reward: r,
                is_terminated: term,
                is_truncated: trunc,
                info,
            } = step;

            let (obs, info) = if term || trunc {
                debug!("Environment {} is reset", i);
                let (obs_reset, mut info_reset) = env.reset()?;
                info_reset.insert(FINAL_OBSERVATION_KEY, InfoValue::Obs(obs));
                info_reset.insert(FINAL_INFO_KEY, InfoValue::Info(info));
                (obs_reset, info_reset)
            } else {
                (obs, info)
            };

            observations.push(obs);
            reward.push(r);
            is_terminated.push(term);
            is_truncated.push(trunc);
            infos.add(i, info);
        }
        self.observations = observations;

        Ok(VecStep {
            obs: self.observations(),
            reward,
            is_terminated,
            is_truncated,
            info: infos,
        })
    }

    /// Closes all environments.
    pub fn close(&mut self) {
        for env in self.envs.iter_mut() {
            env.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_STEPS_KEY, PREV_STEPS_KEY};
    use stride_core::dummy::{CountingEnv, CountingEnvConfig};
    use test_log::test;

    fn vec_env(
        config: &CountingEnvConfig,
        n: usize,
        repeats: RepeatSchedule,
        copy: bool,
    ) -> VecActionRepeat<CountingEnv> {
        let config = VecActionRepeatConfig::new(config.clone())
            .n_envs(n)
            .repeats(repeats)
            .copy(copy);
        VecActionRepeat::build(&config, 0).unwrap()
    }

    #[test]
    fn test_decodes_per_slot() -> Result<()> {
        let mut env = vec_env(
            &CountingEnvConfig::default(),
            2,
            RepeatSchedule::Choices(vec![1, 3]),
            true,
        );
        assert_eq!(env.single_action_space().n(), 4);
        env.reset()?;

        // slot 0: base action 0 once, slot 1: base action 1 three times
        let step = env.step(&[0, 3])?;
        assert_eq!(step.reward, vec![1.0, 3.0]);
        assert_eq!(step.obs.to_vec(), vec![vec![1.0, 0.0], vec![3.0, 1.0]]);

        let n0 = match step.info.get_at("repeats", 0) {
            Some(InfoValue::Info(i)) => i.get_int(NUM_STEPS_KEY)?,
            _ => panic!("missing repeat info"),
        };
        let n1 = match step.info.get_at("repeats", 1) {
            Some(InfoValue::Info(i)) => i.get_transitions(PREV_STEPS_KEY)?.len() as i64,
            _ => panic!("missing repeat info"),
        };
        assert_eq!((n0, n1), (1, 3));
        Ok(())
    }

    #[test]
    fn test_copy_returns_owned_buffer() -> Result<()> {
        let mut env = vec_env(&CountingEnvConfig::default(), 2, RepeatSchedule::Fixed(1), true);
        env.reset()?;
        assert!(matches!(env.step(&[0, 0])?.obs, Cow::Owned(_)));

        let mut env = vec_env(&CountingEnvConfig::default(), 2, RepeatSchedule::Fixed(1), false);
        env.reset()?;
        assert!(matches!(env.step(&[0, 0])?.obs, Cow::Borrowed(_)));
        Ok(())
    }

    #[test]
    fn test_batch_size_mismatch() -> Result<()> {
        let mut env = vec_env(&CountingEnvConfig::default(), 3, RepeatSchedule::Fixed(2), true);
        env.reset()?;
        let err = env.step(&[0, 1]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StrideError>(),
            Some(&StrideError::BatchSizeMismatch {
                expected: 3,
                actual: 2
            })
        );
        Ok(())
    }

    #[test]
    fn test_empty_batch_rejected() {
        let envs: Vec<CountingEnv> = vec![];
        assert!(VecActionRepeat::new(envs, RepeatSchedule::Fixed(1), "repeats", true).is_err());
    }

    #[test]
    fn test_empty_action_space_rejected() -> Result<()> {
        let envs = vec![CountingEnv::build(&CountingEnvConfig::default().n_actions(0), 0)?];
        let err = VecActionRepeat::new(envs, RepeatSchedule::Fixed(2), "repeats", true)
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<StrideError>(),
            Some(&StrideError::EmptyActionSpace)
        );
        Ok(())
    }

    #[test]
    fn test_schedule_and_close() -> Result<()> {
        let mut env = vec_env(&CountingEnvConfig::default(), 2, RepeatSchedule::Fixed(3), true);
        assert_eq!(env.schedule(), &RepeatSchedule::Fixed(3));
        assert!(env.envs().iter().all(|e| !e.is_closed()));

        env.close();
        assert!(env.envs().iter().all(|e| e.is_closed()));
        Ok(())
    }
}
