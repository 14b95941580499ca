use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use elec_agg::{clean_poll_tables, leader_frequency, AggregationConfig};

use crate::emit;
use crate::tables::read_tables;

#[derive(Args, Debug)]
pub struct LeadersArgs {
    /// Poll tables as header-less CSV.
    #[arg(long, required = true, num_args = 1..)]
    pub polls: Vec<PathBuf>,
    /// Optional YAML aggregation config.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &LeadersArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => AggregationConfig::load(path)?,
        None => AggregationConfig::default(),
    };
    let records = clean_poll_tables(&read_tables(&args.polls)?, &config)?;
    emit(&leader_frequency(&records), None)
}
