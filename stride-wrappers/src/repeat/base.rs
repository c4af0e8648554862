use super::ActionRepeatConfig;
use crate::{RepeatSchedule, NUM_STEPS_KEY, PREV_STEPS_KEY};
use anyhow::Result;
use log::{debug, trace};
use stride_core::{Act, Discrete, Env, Info, InfoValue, Step, StrideError, Transition};

/// Applies `a` to `env` up to `repeats` times and folds the inner steps into one.
///
/// The loop stops after the first inner step that terminates or truncates the episode.
/// The returned step has the observation, flags and info of the last inner step and the
/// sum of the rewards. The transitions of all executed inner steps, including the last one,
/// are added to the info under `info_key`.
pub(crate) fn repeat_step<E: Env>(
    env: &mut E,
    a: &E::Act,
    repeats: usize,
    info_key: &str,
) -> Result<Step<E>> {
    let mut reward = 0f32;
    let mut prev_steps = Vec::with_capacity(repeats);
    let mut last = None;

    for _ in 0..repeats {
        let step = env.step(a)?;
        reward += step.reward;
        prev_steps.push(Transition::new(step.obs.clone(), step.reward));
        let is_done = step.is_done();
        last = Some(step);
        if is_done {
            break;
        }
    }

    let Step {
        obs,
        is_terminated,
        is_truncated,
        mut info,
        ..
    } = last.ok_or_else(|| {
        StrideError::InvalidSchedule("repeat count must be positive".to_string())
    })?;

    if info.contains_key(info_key) {
        return Err(StrideError::ReservedInfoKey(info_key.to_string()).into());
    }

    let num_steps = prev_steps.len();
    debug!(
        "Executed {} of {} repeats, reward = {}, done = {}",
        num_steps,
        repeats,
        reward,
        is_terminated || is_truncated
    );

    let mut repeat_info = Info::empty();
    repeat_info.insert(PREV_STEPS_KEY, InfoValue::Transitions(prev_steps));
    repeat_info.insert(NUM_STEPS_KEY, InfoValue::Int(num_steps as i64));
    info.insert(info_key, InfoValue::Info(repeat_info));

    Ok(Step::new(obs, reward, is_terminated, is_truncated, info))
}

/// Repeats an action of the wrapped environment for a number of steps.
///
/// With [`RepeatSchedule::Choices`], the action space of the wrapper is derived from the
/// wrapped one; the wrapped environment is not modified.
///
/// ```rust
/// use stride_core::{dummy::{CountingEnv, CountingEnvConfig}, Env};
/// use stride_wrappers::{ActionRepeat, RepeatSchedule};
///
/// let env = CountingEnv::build(&CountingEnvConfig::default(), 0).unwrap();
/// let mut env = ActionRepeat::new(env, RepeatSchedule::Choices(vec![1, 4]), "repeats").unwrap();
/// assert_eq!(env.action_space().n(), 4);
///
/// env.reset().unwrap();
/// let step = env.step(&3).unwrap(); // base action 1, repeated 4 times
/// assert_eq!(step.reward, 4.0);
/// ```
pub struct ActionRepeat<E: Env> {
    env: E,
    schedule: RepeatSchedule,
    info_key: String,
    action_space: Discrete,
}

impl<E: Env> ActionRepeat<E> {
    /// Wraps an environment.
    ///
    /// Fails if the schedule is malformed or the wrapped environment has no action.
    pub fn new(env: E, schedule: RepeatSchedule, info_key: impl Into<String>) -> Result<Self> {
        schedule.validate()?;
        if env.action_space().n() == 0 {
            return Err(StrideError::EmptyActionSpace.into());
        }
        let action_space = schedule.action_space(env.action_space());
        Ok(Self {
            env,
            schedule,
            info_key: info_key.into(),
            action_space,
        })
    }

    /// Applies an action of the wrapped environment `repeats` times.
    ///
    /// The action is not decoded, it is an action of the wrapped environment.
    pub fn step_with_repeats(&mut self, a: &E::Act, repeats: usize) -> Result<Step<Self>> {
        trace!("ActionRepeat::step_with_repeats()");
        if repeats == 0 {
            return Err(StrideError::InvalidSchedule(
                "repeat count must be positive".to_string(),
            )
            .into());
        }
        let n = self.env.action_space().n();
        if a.index() >= n {
            return Err(StrideError::InvalidAction {
                action: a.index(),
                n,
            }
            .into());
        }

        self.repeat(a, repeats)
    }

    fn repeat(&mut self, a: &E::Act, repeats: usize) -> Result<Step<Self>> {
        let step = repeat_step(&mut self.env, a, repeats, &self.info_key)?;
        Ok(Step::new(
            step.obs,
            step.reward,
            step.is_terminated,
            step.is_truncated,
            step.info,
        ))
    }

    /// The repeat schedule.
    pub fn schedule(&self) -> &RepeatSchedule {
        &self.schedule
    }

    /// The reserved info key.
    pub fn info_key(&self) -> &str {
        &self.info_key
    }

    /// Get a reference to the inner environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Unwraps the inner environment.
    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Env> Env for ActionRepeat<E> {
    type Config = ActionRepeatConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = E::build(&config.env_config, seed)?;
        Self::new(env, config.repeats.clone(), config.info_key.clone())
    }

    fn action_space(&self) -> Discrete {
        self.action_space
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        trace!("ActionRepeat::step()");
        let ix = a.index();
        if !self.action_space.contains(ix) {
            return Err(StrideError::InvalidAction {
                action: ix,
                n: self.action_space.n(),
            }
            .into());
        }

        let (base, repeats) = self.schedule.decode(ix);
        debug!("Action {} decoded into ({}, {})", ix, base, repeats);
        self.repeat(&E::Act::from_index(base), repeats)
    }

    fn reset(&mut self) -> Result<(Self::Obs, Info<Self::Obs>)> {
        trace!("ActionRepeat::reset()");
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<(Self::Obs, Info<Self::Obs>)> {
        self.env.reset_with_index(ix)
    }

    fn close(&mut self) {
        self.env.close()
    }
}
