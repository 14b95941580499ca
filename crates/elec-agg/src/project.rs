use std::collections::{BTreeMap, BTreeSet};

use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::average::average_by_state;
use crate::clean::{clean_delegate_table, clean_poll_tables};
use crate::config::AggregationConfig;
use crate::records::{DelegateAllocation, ProjectionSource, StatePollAverage, StateProjection};
use crate::table::RawTable;

/// Per-state result of a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum StateOutcome {
    /// Poll-derived or authoritative delegate figures.
    Projected(StateProjection),
    /// The state lacked the data needed for any projection and is left out of
    /// the national rollup.
    MissingData {
        /// State name.
        state: String,
        /// Diagnostic describing what was missing.
        reason: String,
    },
}

impl StateOutcome {
    /// State the outcome refers to.
    pub fn state(&self) -> &str {
        match self {
            StateOutcome::Projected(projection) => &projection.state,
            StateOutcome::MissingData { state, .. } => state,
        }
    }

    /// The projection, if one could be made.
    pub fn projection(&self) -> Option<&StateProjection> {
        match self {
            StateOutcome::Projected(projection) => Some(projection),
            StateOutcome::MissingData { .. } => None,
        }
    }
}

/// National totals for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateTotal {
    /// Projected plus awarded delegates across included states.
    pub delegates: f64,
    /// Share of the delegates tracked across the same states.
    pub fraction: f64,
}

/// Sum of per-state figures over every state with a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalRollup {
    /// Delegates at stake across the included states.
    pub tracked_delegates: u64,
    /// Number of states included.
    pub states_included: usize,
    /// Totals per tracked candidate.
    pub by_candidate: BTreeMap<String, CandidateTotal>,
}

/// Full output of the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionReport {
    /// Tracked candidates in report order.
    pub candidates: Vec<String>,
    /// One outcome per state seen in either input, sorted by state name.
    pub states: Vec<StateOutcome>,
    /// National rollup over the projected states.
    pub national: NationalRollup,
}

/// Projects one state's delegates.
///
/// An authoritative award replaces the poll projection outright; candidates
/// missing from the award count as zero. Without an award the projection is
/// `total_delegates * mean_share / 100`, and every tracked candidate needs a
/// poll share for it to be defined.
pub fn project_state(
    state: &str,
    average: Option<&StatePollAverage>,
    allocation: Option<&DelegateAllocation>,
    candidates: &[String],
) -> Result<StateProjection, ElecError> {
    let Some(allocation) = allocation else {
        return Err(ElecError::InsufficientData(
            ErrorInfo::new("no-delegate-total", "state has no delegate allocation")
                .with_context("state", state),
        ));
    };

    if let Some(awards) = &allocation.awarded_by_candidate {
        let delegates_by_candidate = candidates
            .iter()
            .map(|name| (name.clone(), awards.get(name).copied().unwrap_or(0.0)))
            .collect();
        return Ok(StateProjection {
            state: state.to_string(),
            total_delegates: allocation.total_delegates,
            delegates_by_candidate,
            source: ProjectionSource::Authoritative,
        });
    }

    let Some(average) = average else {
        return Err(ElecError::InsufficientData(
            ErrorInfo::new("no-polls", "state has not voted and has no poll rows")
                .with_context("state", state),
        ));
    };
    let missing: Vec<&str> = candidates
        .iter()
        .filter(|name| !average.mean_share_by_candidate.contains_key(name.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(ElecError::InsufficientData(
            ErrorInfo::new("no-candidate-shares", "polls lack a share for a tracked candidate")
                .with_context("state", state)
                .with_context("missing", missing.join(","))
                .with_context("polls", average.poll_count.to_string()),
        ));
    }

    let total = f64::from(allocation.total_delegates);
    let delegates_by_candidate = candidates
        .iter()
        .filter_map(|name| {
            let share = average.mean_share_by_candidate.get(name)?;
            Some((name.clone(), total * share / 100.0))
        })
        .collect();
    Ok(StateProjection {
        state: state.to_string(),
        total_delegates: allocation.total_delegates,
        delegates_by_candidate,
        source: ProjectionSource::Polls,
    })
}

/// Sums projections into national totals.
pub fn national_rollup(
    projections: &[&StateProjection],
    candidates: &[String],
) -> Result<NationalRollup, ElecError> {
    if projections.is_empty() {
        return Err(ElecError::InsufficientData(ErrorInfo::new(
            "empty-rollup",
            "no state has a projection",
        )));
    }
    let tracked_delegates: u64 = projections
        .iter()
        .map(|projection| u64::from(projection.total_delegates))
        .sum();
    if tracked_delegates == 0 {
        return Err(ElecError::DivisionUndefined(
            ErrorInfo::new("zero-tracked-delegates", "projected states carry no delegates")
                .with_context("states", projections.len().to_string()),
        ));
    }

    let by_candidate = candidates
        .iter()
        .map(|name| {
            let delegates: f64 = projections
                .iter()
                .filter_map(|projection| projection.delegates_by_candidate.get(name))
                .sum();
            let total = CandidateTotal {
                delegates,
                fraction: delegates / tracked_delegates as f64,
            };
            (name.clone(), total)
        })
        .collect();
    Ok(NationalRollup {
        tracked_delegates,
        states_included: projections.len(),
        by_candidate,
    })
}

/// Projects every state present in the averages or the allocations and rolls
/// them up. States without enough data become [`StateOutcome::MissingData`].
pub fn aggregate(
    averages: &BTreeMap<String, StatePollAverage>,
    allocations: &[DelegateAllocation],
    candidates: &[String],
) -> Result<ProjectionReport, ElecError> {
    let mut by_state: BTreeMap<&str, &DelegateAllocation> = BTreeMap::new();
    for allocation in allocations {
        if by_state.insert(allocation.state.as_str(), allocation).is_some() {
            return Err(ElecError::Config(
                ErrorInfo::new("duplicate-allocation", "state listed twice in delegate data")
                    .with_context("state", allocation.state.clone()),
            ));
        }
    }

    let states: BTreeSet<&str> = averages
        .keys()
        .map(String::as_str)
        .chain(by_state.keys().copied())
        .collect();

    let mut outcomes = Vec::with_capacity(states.len());
    for state in states {
        match project_state(
            state,
            averages.get(state),
            by_state.get(state).copied(),
            candidates,
        ) {
            Ok(projection) => outcomes.push(StateOutcome::Projected(projection)),
            Err(ElecError::InsufficientData(info)) => {
                warn!("{state}: excluded from rollup ({})", info.message);
                outcomes.push(StateOutcome::MissingData {
                    state: state.to_string(),
                    reason: info.message,
                });
            }
            Err(err) => return Err(err),
        }
    }

    let projected: Vec<&StateProjection> =
        outcomes.iter().filter_map(StateOutcome::projection).collect();
    let national = national_rollup(&projected, candidates)?;
    info!(
        "projected {} of {} states, {} delegates tracked",
        national.states_included,
        outcomes.len(),
        national.tracked_delegates
    );
    Ok(ProjectionReport {
        candidates: candidates.to_vec(),
        states: outcomes,
        national,
    })
}

/// Runs the whole pipeline from raw tables: clean, average, project, roll up.
pub fn aggregate_tables(
    poll_tables: &[RawTable],
    delegate_table: &RawTable,
    config: &AggregationConfig,
) -> Result<ProjectionReport, ElecError> {
    config.validate()?;
    let records = clean_poll_tables(poll_tables, config)?;
    let allocations = clean_delegate_table(delegate_table, config)?;
    let averages = average_by_state(&records);
    aggregate(&averages, &allocations, &config.candidates)
}
