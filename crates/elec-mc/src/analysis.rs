use elec_core::errors::ErrorInfo;
use elec_core::{ElecError, RngHandle};
use serde::{Deserialize, Serialize};

use crate::params::Region;
use crate::sample::{advantage, draw_sample, with_region};

/// Equal-width histogram over `[edges[0], edges[last]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bucket boundaries, one more than the number of buckets.
    pub edges: Vec<f64>,
    /// Observations per bucket. The last bucket is closed on the right.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Buckets `values` into `bins` equal-width intervals spanning their range.
    /// Collapses to one bucket when every value is equal.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let (min, max) = min_max(values);
        if values.is_empty() || bins == 0 || min == max {
            return Self {
                edges: vec![min, max],
                counts: vec![values.len() as u64],
            };
        }
        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        let mut counts = vec![0u64; bins];
        for &value in values {
            let bucket = (((value - min) / width) as usize).min(bins - 1);
            counts[bucket] += 1;
        }
        Self { edges, counts }
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Sampling distribution of the advantage in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvantageDistribution {
    /// Region polled.
    pub region: String,
    /// Population margin the samples scatter around.
    pub true_margin: f64,
    /// Respondents per simulated poll.
    pub sample_size: u64,
    /// Number of simulated polls.
    pub samples: u64,
    /// Mean advantage.
    pub mean: f64,
    /// Population standard deviation of the advantage.
    pub std_dev: f64,
    /// Smallest advantage seen.
    pub min: f64,
    /// Largest advantage seen.
    pub max: f64,
    /// Fraction of polls showing the candidate strictly ahead.
    pub fraction_positive: f64,
    /// Bucketed advantages for plotting.
    pub histogram: Histogram,
}

/// Advantage of `samples` independent polls of `n` respondents in `region`.
pub fn advantage_samples(
    n: u64,
    region: &Region,
    samples: u64,
    rng: &mut RngHandle,
) -> Result<Vec<f64>, ElecError> {
    if samples == 0 {
        return Err(ElecError::InvalidTrialCount(
            ErrorInfo::new("sample-count", "number of simulated polls must be positive")
                .with_context("region", region.name.clone())
                .with_context("samples", "0"),
        ));
    }
    (0..samples)
        .map(|_| {
            let draw =
                draw_sample(n, &region.params, rng).map_err(|err| with_region(err, region))?;
            advantage(&draw)
        })
        .collect()
}

/// Summarises the sampling distribution of the advantage in `region`.
pub fn advantage_distribution(
    n: u64,
    region: &Region,
    samples: u64,
    bins: usize,
    rng: &mut RngHandle,
) -> Result<AdvantageDistribution, ElecError> {
    if bins == 0 {
        return Err(ElecError::Config(
            ErrorInfo::new("histogram-bins", "histogram needs at least one bin")
                .with_context("bins", "0"),
        ));
    }
    let values = advantage_samples(n, region, samples, rng)?;
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
    let (min, max) = min_max(&values);
    let positive = values.iter().filter(|&&v| v > 0.0).count();
    Ok(AdvantageDistribution {
        region: region.name.clone(),
        true_margin: region.params.margin(),
        sample_size: n,
        samples,
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        fraction_positive: positive as f64 / count,
        histogram: Histogram::from_values(&values, bins),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value() {
        let values = [-0.1, -0.05, 0.0, 0.02, 0.1];
        let hist = Histogram::from_values(&values, 4);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.counts[3], 1);
    }

    #[test]
    fn constant_values_collapse_to_one_bucket() {
        let hist = Histogram::from_values(&[0.25; 6], 10);
        assert_eq!(hist.counts, vec![6]);
        assert_eq!(hist.edges, vec![0.25, 0.25]);
    }
}
