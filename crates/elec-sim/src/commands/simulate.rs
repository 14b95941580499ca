use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use elec_mc::{estimate_win_probability, SimulationConfig};

use crate::emit;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// YAML simulation config. Defaults to the 2016 swing-state scenario.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Master seed; overrides the config. Omit for a fresh seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of trials; overrides the config.
    #[arg(long)]
    pub trials: Option<u64>,
    /// Respondents per region poll; overrides the config.
    #[arg(long)]
    pub sample_size: Option<u64>,
    /// Worker threads; overrides the config.
    #[arg(long)]
    pub workers: Option<usize>,
    /// Write the estimate here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    })
}

pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = Some(seed);
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(sample_size) = args.sample_size {
        config.sample_size = sample_size;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let scenario = config.scenario()?;
    let estimate = estimate_win_probability(
        &scenario,
        config.sample_size,
        config.trials,
        &config.estimate_opts(),
    )?;
    emit(&estimate, args.out.as_ref())
}
