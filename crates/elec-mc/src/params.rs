use elec_core::errors::ErrorInfo;
use elec_core::{is_probability, sums_to_one, ElecError, SHARE_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Ground-truth vote shares of one region: the tracked candidate, the
/// opponent, and everyone else.
///
/// Construction guarantees each share is a probability and that the triple
/// sums to one within [`SHARE_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoteShareParams {
    candidate: f64,
    opponent: f64,
    other: f64,
}

impl VoteShareParams {
    /// Validates and builds a share triple.
    pub fn new(candidate: f64, opponent: f64, other: f64) -> Result<Self, ElecError> {
        for (label, value) in [("candidate", candidate), ("opponent", opponent), ("other", other)] {
            if !is_probability(value) {
                return Err(ElecError::InvalidDistribution(
                    ErrorInfo::new("share-out-of-range", "vote share must lie in [0, 1]")
                        .with_context("share", label)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        let total = candidate + opponent + other;
        if !sums_to_one(total) {
            return Err(ElecError::InvalidDistribution(
                ErrorInfo::new("share-sum", "vote shares must sum to 1")
                    .with_context("sum", total.to_string())
                    .with_context("tolerance", SHARE_TOLERANCE.to_string()),
            ));
        }
        Ok(Self {
            candidate,
            opponent,
            other,
        })
    }

    /// Builds a triple from the two headline shares, assigning the remainder
    /// to other candidates.
    pub fn with_remainder(candidate: f64, opponent: f64) -> Result<Self, ElecError> {
        Self::new(candidate, opponent, 1.0 - (candidate + opponent))
    }

    /// Share of the tracked candidate.
    pub fn candidate(&self) -> f64 {
        self.candidate
    }

    /// Share of the opponent.
    pub fn opponent(&self) -> f64 {
        self.opponent
    }

    /// Share of all other candidates.
    pub fn other(&self) -> f64 {
        self.other
    }

    /// Shares in draw order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.candidate, self.opponent, self.other]
    }

    /// True margin `candidate - opponent` of the population.
    pub fn margin(&self) -> f64 {
        self.candidate - self.opponent
    }
}

#[derive(Deserialize)]
struct RawShares {
    #[serde(default)]
    candidate: Option<f64>,
    #[serde(default)]
    lead: Option<f64>,
    opponent: f64,
    #[serde(default)]
    other: Option<f64>,
}

impl<'de> Deserialize<'de> for VoteShareParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawShares::deserialize(deserializer)?;
        let candidate = match (raw.candidate, raw.lead) {
            (Some(share), None) | (None, Some(share)) => share,
            (Some(_), Some(_)) => {
                return Err(serde::de::Error::custom(
                    "give the candidate share as either `candidate` or `lead`, not both",
                ))
            }
            (None, None) => return Err(serde::de::Error::missing_field("candidate")),
        };
        let built = match raw.other {
            Some(other) => Self::new(candidate, raw.opponent, other),
            None => Self::with_remainder(candidate, raw.opponent),
        };
        built.map_err(serde::de::Error::custom)
    }
}

/// A modeled region: its name, fixed shares and electoral weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region name as referenced by win formulas.
    pub name: String,
    /// Ground-truth vote shares.
    #[serde(flatten)]
    pub params: VoteShareParams,
    /// Electoral votes carried by the region. Metadata only; win rules are
    /// expressed as formulas.
    pub electoral_votes: u32,
    /// Total voters in the actual election, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnout: Option<u64>,
}

impl Region {
    /// Creates a region without turnout metadata.
    pub fn new(name: impl Into<String>, params: VoteShareParams, electoral_votes: u32) -> Self {
        Self {
            name: name.into(),
            params,
            electoral_votes,
            turnout: None,
        }
    }

    /// Attaches the actual turnout.
    pub fn with_turnout(mut self, turnout: u64) -> Self {
        self.turnout = Some(turnout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_fills_other_share() {
        let params = VoteShareParams::with_remainder(0.4902, 0.4782).unwrap();
        assert!((params.other() - 0.0316).abs() < 1e-12);
        assert!((params.margin() - 0.012).abs() < 1e-12);
    }

    #[test]
    fn overfull_headline_shares_are_rejected() {
        let err = VoteShareParams::with_remainder(0.7, 0.4).unwrap_err();
        assert!(matches!(err, ElecError::InvalidDistribution(_)));
    }
}
