use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use commands::{
    distribution::{self, DistributionArgs},
    leaders::{self, LeadersArgs},
    project::{self, ProjectArgs},
    simulate::{self, SimulateArgs},
};

mod commands;
mod tables;

#[derive(Parser, Debug)]
#[command(name = "elec-sim", about = "Primary projection and polling-error simulation CLI")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend state polls with delegate counts into a national projection.
    Project(ProjectArgs),
    /// Tally which candidate leads the spread in each state poll.
    Leaders(LeadersArgs),
    /// Estimate how often unbiased polls call the winner of a scenario.
    Simulate(SimulateArgs),
    /// Summarise the sampling distribution of the advantage per region.
    Distribution(DistributionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Project(args) => project::run(&args),
        Command::Leaders(args) => leaders::run(&args),
        Command::Simulate(args) => simulate::run(&args),
        Command::Distribution(args) => distribution::run(&args),
    }
}

/// Prints `value` as JSON on stdout, or writes it to `out` when given.
pub(crate) fn emit<T: serde::Serialize>(value: &T, out: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => write_json(path, value),
        None => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
    }
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
