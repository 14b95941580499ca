use elec_core::errors::ErrorInfo;
use elec_core::{ElecError, RngHandle};
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};

use crate::params::{Region, VoteShareParams};

/// Vote counts of one simulated poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDraw {
    /// Respondents choosing the tracked candidate.
    pub candidate: u64,
    /// Respondents choosing the opponent.
    pub opponent: u64,
    /// Respondents choosing anyone else.
    pub other: u64,
}

impl SampleDraw {
    /// Creates a draw from explicit counts.
    pub fn new(candidate: u64, opponent: u64, other: u64) -> Self {
        Self {
            candidate,
            opponent,
            other,
        }
    }

    /// Sample size.
    pub fn total(&self) -> u64 {
        self.candidate + self.opponent + self.other
    }
}

pub(crate) fn validate_sample_size(n: u64) -> Result<(), ElecError> {
    if n == 0 {
        return Err(ElecError::InvalidSampleSize(
            ErrorInfo::new("sample-size", "sample size must be a positive integer")
                .with_context("n", n.to_string()),
        ));
    }
    Ok(())
}

fn binomial(n: u64, p: f64, rng: &mut RngHandle) -> Result<u64, ElecError> {
    if n == 0 {
        return Ok(0);
    }
    let dist = Binomial::new(n, p.clamp(0.0, 1.0)).map_err(|err| {
        ElecError::InvalidDistribution(
            ErrorInfo::new("binomial", err.to_string())
                .with_context("n", n.to_string())
                .with_context("p", p.to_string()),
        )
    })?;
    Ok(dist.sample(rng))
}

/// Draws one multinomial sample of `n` respondents from `params`.
///
/// Counts are drawn as a chain of conditional binomials, so the three counts
/// always sum to exactly `n`.
pub fn draw_sample(
    n: u64,
    params: &VoteShareParams,
    rng: &mut RngHandle,
) -> Result<SampleDraw, ElecError> {
    validate_sample_size(n)?;
    let candidate = binomial(n, params.candidate(), rng)?;
    let rest = n - candidate;
    let remaining_mass = 1.0 - params.candidate();
    let opponent = if remaining_mass > 0.0 {
        binomial(rest, params.opponent() / remaining_mass, rng)?
    } else {
        0
    };
    Ok(SampleDraw {
        candidate,
        opponent,
        other: rest - opponent,
    })
}

/// Signed share difference `(candidate - opponent) / n`, in `[-1, 1]`.
pub fn advantage(sample: &SampleDraw) -> Result<f64, ElecError> {
    let n = sample.total();
    if n == 0 {
        return Err(ElecError::DivisionUndefined(
            ErrorInfo::new("empty-sample", "advantage of an empty sample is undefined")
                .with_context("n", "0"),
        ));
    }
    Ok((sample.candidate as f64 - sample.opponent as f64) / n as f64)
}

/// Whether the sample shows the candidate ahead. A tie is not a win.
pub fn is_win(sample: &SampleDraw) -> Result<bool, ElecError> {
    Ok(advantage(sample)? > 0.0)
}

/// Draws a sample of `n` in `region` and reports whether the candidate leads.
pub fn region_won(n: u64, region: &Region, rng: &mut RngHandle) -> Result<bool, ElecError> {
    let sample = draw_sample(n, &region.params, rng).map_err(|err| with_region(err, region))?;
    is_win(&sample)
}

pub(crate) fn with_region(err: ElecError, region: &Region) -> ElecError {
    let attach = |info: ErrorInfo| info.with_context("region", region.name.clone());
    match err {
        ElecError::InvalidSampleSize(info) => ElecError::InvalidSampleSize(attach(info)),
        ElecError::InvalidDistribution(info) => ElecError::InvalidDistribution(attach(info)),
        other => other,
    }
}
