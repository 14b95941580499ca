use elec_core::errors::ErrorInfo;
use elec_core::{resolve_seed, ElecError, RunProvenance};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::determinism;
use crate::sample::validate_sample_size;
use crate::scenario::Scenario;

/// Options controlling a win-probability estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimateOpts {
    /// Master seed. `None` draws a fresh seed, recorded in the provenance.
    pub seed: Option<u64>,
    /// Label copied into the provenance.
    pub seed_label: Option<String>,
    /// Number of workers sharing the trials (0 and 1 both run inline).
    pub workers: usize,
}

impl EstimateOpts {
    /// Options for a reproducible single-worker run.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            seed_label: None,
            workers: 1,
        }
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Fraction of trials in which the candidate wins under the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinEstimate {
    /// Scenario the trials were run against.
    pub scenario: String,
    /// Respondents polled per region per trial.
    pub sample_size: u64,
    /// Number of trials run.
    pub trials: u64,
    /// Trials won.
    pub wins: u64,
    /// `wins / trials`.
    pub probability: f64,
    /// Binomial standard error of `probability`.
    pub standard_error: f64,
    /// Workers the trials were split across.
    pub workers: usize,
    /// Seed and timestamp needed to replay the estimate.
    pub provenance: RunProvenance,
}

fn validate_trials(trials: u64) -> Result<(), ElecError> {
    if trials == 0 {
        return Err(ElecError::InvalidTrialCount(
            ErrorInfo::new("trial-count", "trial count must be a positive integer")
                .with_context("trials", trials.to_string()),
        ));
    }
    Ok(())
}

/// Threads backing `chunks` workers: never more than rayon's default pool.
/// Chunks beyond that queue on the pool, so results still depend only on the
/// chunk count.
fn pool_threads(chunks: usize) -> usize {
    chunks.min(rayon::current_num_threads()).max(1)
}

fn run_chunk(
    scenario: &Scenario,
    n: u64,
    trials: u64,
    master_seed: u64,
    worker: usize,
) -> Result<u64, ElecError> {
    let mut rng = determinism::worker_rng(master_seed, worker);
    let mut wins = 0;
    for _ in 0..trials {
        if scenario.outcome_wins(n, &mut rng)? {
            wins += 1;
        }
    }
    debug!("worker {worker}: {wins}/{trials} wins");
    Ok(wins)
}

/// Runs `trials` independent trials of [`Scenario::outcome_wins`] and
/// returns the fraction won.
///
/// Trials are split into contiguous chunks, one per worker, each with its own
/// substream of the master seed; a fixed `(seed, workers)` pair always gives
/// the same result.
pub fn estimate_win_probability(
    scenario: &Scenario,
    n: u64,
    trials: u64,
    opts: &EstimateOpts,
) -> Result<WinEstimate, ElecError> {
    validate_sample_size(n)?;
    validate_trials(trials)?;
    let seed = resolve_seed(opts.seed);
    let chunks = determinism::chunk_sizes(trials, opts.workers);

    let wins: u64 = if chunks.len() == 1 {
        run_chunk(scenario, n, trials, seed, 0)?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(pool_threads(chunks.len()))
            .build()
            .map_err(|err| ElecError::config("thread-pool", err))?;
        let partials: Result<Vec<u64>, ElecError> = pool.install(|| {
            chunks
                .par_iter()
                .enumerate()
                .map(|(worker, &count)| run_chunk(scenario, n, count, seed, worker))
                .collect()
        });
        partials?.into_iter().sum()
    };

    let probability = wins as f64 / trials as f64;
    let standard_error = (probability * (1.0 - probability) / trials as f64).sqrt();
    info!(
        "{}: {wins}/{trials} trials won at n={n} (p={probability:.4}, seed={seed})",
        scenario.name()
    );
    Ok(WinEstimate {
        scenario: scenario.name().to_string(),
        sample_size: n,
        trials,
        wins,
        probability,
        standard_error,
        workers: chunks.len(),
        provenance: RunProvenance::stamp(seed, opts.seed_label.clone())
            .with_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    })
}
