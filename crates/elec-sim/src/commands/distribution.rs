use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use elec_core::{resolve_seed, RngHandle};
use elec_mc::determinism::distribution_seed;
use elec_mc::{advantage_distribution, AdvantageDistribution};
use log::info;
use serde::Serialize;

use super::simulate::load_config;
use crate::emit;

#[derive(Args, Debug)]
pub struct DistributionArgs {
    /// Regions to summarise. Defaults to every region of the scenario.
    #[arg(long = "region")]
    pub regions: Vec<String>,
    /// YAML simulation config. Defaults to the 2016 swing-state scenario.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Simulated polls per region.
    #[arg(long, default_value_t = 100_000)]
    pub samples: u64,
    /// Master seed; overrides the config.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the summaries here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DistributionReport {
    seed: u64,
    distributions: Vec<AdvantageDistribution>,
}

pub fn run(args: &DistributionArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_ref())?;
    let scenario = config.scenario()?;
    let seed = resolve_seed(args.seed.or(config.seed_policy.master_seed));

    let names: Vec<String> = if args.regions.is_empty() {
        scenario.regions().map(|region| region.name.clone()).collect()
    } else {
        args.regions.clone()
    };

    let mut distributions = Vec::with_capacity(names.len());
    for name in &names {
        let region = scenario.region(name)?;
        let index = scenario
            .regions()
            .position(|candidate| candidate.name == region.name)
            .unwrap_or_default();
        let mut rng = RngHandle::from_seed(distribution_seed(seed, index));
        let dist = advantage_distribution(
            config.sample_size,
            region,
            args.samples,
            config.histogram_bins,
            &mut rng,
        )?;
        info!(
            "{}: mean advantage {:+.4}, sd {:.4}, ahead in {:.1}% of polls",
            dist.region,
            dist.mean,
            dist.std_dev,
            dist.fraction_positive * 100.0
        );
        distributions.push(dist);
    }
    emit(&DistributionReport { seed, distributions }, args.out.as_ref())
}
