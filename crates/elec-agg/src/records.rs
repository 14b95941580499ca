use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One cleaned poll for a single state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollRecord {
    /// State the poll was taken in.
    pub state: String,
    /// Percentage (0-100) per candidate; `None` when the poll did not report one.
    pub candidate_share: BTreeMap<String, Option<f64>>,
    /// Candidate named in the spread column, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
}

impl PollRecord {
    /// Convenience constructor from fully known shares.
    pub fn new<'a>(state: impl Into<String>, shares: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            state: state.into(),
            candidate_share: shares
                .into_iter()
                .map(|(name, share)| (name.to_string(), Some(share)))
                .collect(),
            leader: None,
        }
    }

    /// Share reported for `candidate`, if known.
    pub fn share(&self, candidate: &str) -> Option<f64> {
        self.candidate_share.get(candidate).copied().flatten()
    }
}

/// Mean share per candidate over every poll of one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePollAverage {
    /// State the averages belong to.
    pub state: String,
    /// Mean percentage per candidate. Candidates never reported are absent.
    pub mean_share_by_candidate: BTreeMap<String, f64>,
    /// Number of poll rows that contributed.
    pub poll_count: usize,
}

/// Delegate pool and, once the state has voted, the authoritative award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegateAllocation {
    /// State name.
    pub state: String,
    /// Delegates at stake in the state.
    pub total_delegates: u32,
    /// Awarded delegates per candidate; `None` while the state has not voted.
    #[serde(default)]
    pub awarded_by_candidate: Option<BTreeMap<String, f64>>,
}

impl DelegateAllocation {
    /// Allocation for a state that has not voted yet.
    pub fn pending(state: impl Into<String>, total_delegates: u32) -> Self {
        Self {
            state: state.into(),
            total_delegates,
            awarded_by_candidate: None,
        }
    }

    /// Allocation carrying an authoritative award.
    pub fn awarded<'a>(
        state: impl Into<String>,
        total_delegates: u32,
        awards: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        Self {
            state: state.into(),
            total_delegates,
            awarded_by_candidate: Some(
                awards
                    .into_iter()
                    .map(|(name, count)| (name.to_string(), count))
                    .collect(),
            ),
        }
    }

    /// Returns true once actual results exist for the state.
    pub fn has_voted(&self) -> bool {
        self.awarded_by_candidate.is_some()
    }
}

/// Where a state's delegate figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionSource {
    /// Poll average scaled by the delegate pool.
    Polls,
    /// Actual awarded delegates.
    Authoritative,
}

/// Best available delegate figures for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateProjection {
    /// State name.
    pub state: String,
    /// Delegates at stake.
    pub total_delegates: u32,
    /// Projected or awarded delegates per tracked candidate.
    pub delegates_by_candidate: BTreeMap<String, f64>,
    /// Provenance of the figures.
    pub source: ProjectionSource,
}
