use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use stride_core::{
    dummy::{CountingEnv, CountingEnvConfig},
    Env as _,
};
use stride_wrappers::{ActionRepeat, ActionRepeatConfig, RepeatSchedule, NUM_STEPS_KEY};

type Env = ActionRepeat<CountingEnv>;

/// Takes random actions with repeat counts chosen by the action
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The number of calls of `step`
    #[arg(short, long, default_value_t = 10)]
    steps: usize,

    /// Repeat counts an action can choose from
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 4])]
    repeats: Vec<usize>,

    /// Episode length of the environment
    #[arg(long, default_value_t = 20)]
    horizon: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// YAML file of `ActionRepeatConfig`, overrides `--repeats` and `--horizon`
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn config(args: &Args) -> Result<ActionRepeatConfig<CountingEnvConfig>> {
    match args.config.as_ref() {
        Some(path) => ActionRepeatConfig::load(path),
        None => {
            let env_config = CountingEnvConfig::default()
                .n_actions(3)
                .horizon(Some(args.horizon));
            Ok(ActionRepeatConfig::new(env_config)
                .repeats(RepeatSchedule::Choices(args.repeats.clone())))
        }
    }
}

/// Returns the total number of inner steps.
fn run(args: &Args) -> Result<usize> {
    let config = config(args)?;
    let mut env = Env::build(&config, args.seed as i64)?;
    let mut rng = fastrand::Rng::with_seed(args.seed);
    let action_space = env.action_space();
    info!(
        "{} actions, {} of the wrapped environment",
        action_space.n(),
        env.inner().action_space().n()
    );

    let mut total = 0;
    env.reset()?;
    for _ in 0..args.steps {
        let a = action_space.sample(&mut rng);
        let step = env.step(&a)?;
        let num_steps = step.info.get_info(env.info_key())?.get_int(NUM_STEPS_KEY)?;
        info!("action = {}, num_steps = {}, reward = {}", a, num_steps, step.reward);
        total += num_steps as usize;

        if step.is_done() {
            env.reset()?;
        }
    }
    env.close();

    Ok(total)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let total = run(&args)?;
    info!("{} inner steps in {} calls", total, args.steps);
    Ok(())
}
