use anyhow::Result;
use stride_core::{
    dummy::{CountingEnv, CountingEnvConfig},
    Env, InfoValue, StrideError,
};
use stride_wrappers::{
    RepeatSchedule, VecActionRepeat, VecActionRepeatConfig, FINAL_INFO_KEY,
    FINAL_OBSERVATION_KEY, NUM_STEPS_KEY,
};
use test_log::test;

fn build(
    config: CountingEnvConfig,
    n_envs: usize,
    repeats: RepeatSchedule,
) -> VecActionRepeat<CountingEnv> {
    let config = VecActionRepeatConfig::new(config)
        .n_envs(n_envs)
        .repeats(repeats);
    VecActionRepeat::build(&config, 10).unwrap()
}

#[test]
fn test_reset_all() -> Result<()> {
    let mut env = build(CountingEnvConfig::default(), 3, RepeatSchedule::Fixed(2));
    let (obs, info) = env.reset()?;

    assert_eq!(obs.len(), 3);
    assert!(obs.iter().all(|o| o == &vec![0.0, 0.0]));
    assert_eq!(info.num_envs(), 3);
    for i in 0..3 {
        assert_eq!(info.get_at("seed", i), Some(&InfoValue::Int(10 + i as i64)));
    }
    Ok(())
}

#[test]
fn test_auto_reset_keeps_final_step() -> Result<()> {
    // The episode ends at the 3rd step; 2 repeats per call.
    let config = CountingEnvConfig::default().horizon(Some(3));
    let mut env = build(config, 1, RepeatSchedule::Fixed(2));
    env.reset()?;

    let step = env.step(&[1])?;
    assert_eq!(step.is_done(), vec![false]);
    assert_eq!(step.obs[0], vec![2.0, 1.0]);

    // Only one inner step is executed before the episode ends.
    let step = env.step(&[1])?;
    assert_eq!(step.is_terminated, vec![true]);
    assert_eq!(step.is_truncated, vec![false]);
    assert_eq!(step.reward, vec![1.0]);
    assert_eq!(step.obs[0], vec![0.0, 0.0]);

    let final_obs = step.info.get_at(FINAL_OBSERVATION_KEY, 0);
    assert_eq!(final_obs, Some(&InfoValue::Obs(vec![3.0, 1.0])));

    let final_info = match step.info.get_at(FINAL_INFO_KEY, 0) {
        Some(InfoValue::Info(info)) => info.clone(),
        other => panic!("unexpected final info: {:?}", other),
    };
    assert_eq!(final_info.get_int("t")?, 3);
    assert_eq!(final_info.get_info("repeats")?.get_int(NUM_STEPS_KEY)?, 1);

    // The info of the reset is reported along with the final step.
    assert_eq!(step.info.get_at("seed", 0), Some(&InfoValue::Int(10)));
    assert!(step.info.get_at("repeats", 0).is_none());
    Ok(())
}

#[test]
fn test_auto_reset_on_truncation() -> Result<()> {
    let config = CountingEnvConfig::default().horizon(Some(2)).truncate(true);
    let mut env = build(config, 1, RepeatSchedule::Fixed(4));
    env.reset()?;

    let step = env.step(&[0])?;
    assert_eq!(step.is_truncated, vec![true]);
    assert_eq!(step.is_terminated, vec![false]);
    assert_eq!(step.reward, vec![2.0]);
    assert_eq!(step.obs[0], vec![0.0, 0.0]);

    assert_eq!(
        step.info.get_at(FINAL_OBSERVATION_KEY, 0),
        Some(&InfoValue::Obs(vec![2.0, 0.0]))
    );
    let final_info = match step.info.get_at(FINAL_INFO_KEY, 0) {
        Some(InfoValue::Info(info)) => info.clone(),
        other => panic!("unexpected final info: {:?}", other),
    };
    assert_eq!(final_info.get_int("t")?, 2);
    assert_eq!(final_info.get_info("repeats")?.get_int(NUM_STEPS_KEY)?, 2);
    assert_eq!(env.envs()[0].n_resets(), 2);
    Ok(())
}

#[test]
fn test_slot_independence() -> Result<()> {
    // Slot 0 ends its episode after 2 steps, slot 1 never does.
    let config = CountingEnvConfig::default().horizon(Some(2));
    let mut env = build(config, 2, RepeatSchedule::Choices(vec![1, 2]));
    env.reset()?;

    // Slot 0: base action 0 twice (ends). Slot 1: base action 1 once.
    let step = env.step(&[1, 2])?;
    assert_eq!(step.is_terminated, vec![true, false]);
    assert_eq!(step.obs[0], vec![0.0, 0.0]);
    assert_eq!(step.obs[1], vec![1.0, 1.0]);

    assert_eq!(step.info.mask(FINAL_OBSERVATION_KEY), vec![true, false]);
    assert_eq!(step.info.mask(FINAL_INFO_KEY), vec![true, false]);
    assert_eq!(step.info.mask("repeats"), vec![false, true]);
    let slot1 = step.info.slot(1);
    assert_eq!(slot1.get_int("t")?, 1);
    assert!(!slot1.contains_key(FINAL_OBSERVATION_KEY));

    assert_eq!(env.envs()[0].n_resets(), 2);
    assert_eq!(env.envs()[1].n_resets(), 1);
    assert_eq!(env.envs()[1].t(), 1);
    Ok(())
}

#[test]
fn test_invalid_action_in_batch() -> Result<()> {
    let mut env = build(CountingEnvConfig::default(), 2, RepeatSchedule::Choices(vec![1, 4]));
    env.reset()?;

    let err = env.step(&[0, 4]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StrideError>(),
        Some(&StrideError::InvalidAction { action: 4, n: 4 })
    );
    // No environment was stepped.
    assert!(env.envs().iter().all(|e| e.n_calls() == 0));
    Ok(())
}

#[test]
fn test_reserved_key_collision_in_batch() -> Result<()> {
    let config = CountingEnvConfig::default().info_key(Some("repeats".to_string()));
    let mut env = build(config, 2, RepeatSchedule::Fixed(1));
    env.reset()?;

    let err = env.step(&[0, 0]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StrideError>(),
        Some(&StrideError::ReservedInfoKey("repeats".to_string()))
    );
    Ok(())
}

#[test]
fn test_failing_slot_resets_no_slot() -> Result<()> {
    // Slot 0 ends its episode in this call, slot 1 collides with the reserved key.
    let envs = vec![
        CountingEnv::build(&CountingEnvConfig::default().horizon(Some(1)), 0)?,
        CountingEnv::build(
            &CountingEnvConfig::default().info_key(Some("repeats".to_string())),
            1,
        )?,
    ];
    let mut env = VecActionRepeat::new(envs, RepeatSchedule::Fixed(1), "repeats", true)?;
    env.reset()?;

    let err = env.step(&[0, 0]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StrideError>(),
        Some(&StrideError::ReservedInfoKey("repeats".to_string()))
    );

    // The episode of slot 0 ended but the slot was not reset.
    assert_eq!(env.envs()[0].n_calls(), 1);
    assert_eq!(env.envs()[0].n_resets(), 1);
    assert_eq!(env.envs()[0].t(), 1);
    Ok(())
}
