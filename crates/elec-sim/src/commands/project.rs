use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use elec_agg::project::aggregate_tables;
use elec_agg::AggregationConfig;
use log::info;

use crate::emit;
use crate::tables::{read_table, read_tables};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Poll tables as header-less CSV, one file per scraped table.
    #[arg(long, required = true, num_args = 1..)]
    pub polls: Vec<PathBuf>,
    /// Delegate-count table as header-less CSV.
    #[arg(long)]
    pub delegates: PathBuf,
    /// Optional YAML aggregation config overriding candidates and columns.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ProjectArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => AggregationConfig::load(path)?,
        None => AggregationConfig::default(),
    };
    let polls = read_tables(&args.polls)?;
    let delegates = read_table(&args.delegates)?;
    let report = aggregate_tables(&polls, &delegates, &config)?;
    for (name, total) in &report.national.by_candidate {
        info!(
            "{name}: approx. {:.1} delegates ({:.1}%)",
            total.delegates,
            total.fraction * 100.0
        );
    }
    emit(&report, args.out.as_ref())
}
