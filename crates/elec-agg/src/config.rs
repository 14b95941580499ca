use std::fs;
use std::path::Path;

use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters for the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Candidates whose shares and delegates are tracked, in report order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    /// Race label of national polls, which are dropped during cleaning.
    #[serde(default = "default_national_race")]
    pub national_race: String,
    /// Column layout of the poll tables.
    #[serde(default)]
    pub poll_columns: PollColumns,
    /// Column layout of the delegate table.
    #[serde(default)]
    pub delegate_columns: DelegateColumns,
}

fn default_candidates() -> Vec<String> {
    vec!["Biden".to_string(), "Sanders".to_string()]
}

fn default_national_race() -> String {
    "2020 Democratic Presidential Nomination".to_string()
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            national_race: default_national_race(),
            poll_columns: PollColumns::default(),
            delegate_columns: DelegateColumns::default(),
        }
    }
}

impl AggregationConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ElecError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            ElecError::Config(
                ErrorInfo::new("aggregation-config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|err| {
            ElecError::Config(
                ErrorInfo::new("aggregation-config-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot drive a projection.
    pub fn validate(&self) -> Result<(), ElecError> {
        if self.candidates.is_empty() {
            return Err(ElecError::Config(
                ErrorInfo::new("no-candidates", "at least one candidate must be tracked")
                    .with_hint("list candidate names under `candidates`"),
            ));
        }
        Ok(())
    }
}

/// Column positions within a poll table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollColumns {
    /// Race description, e.g. "Iowa Democratic Presidential Caucus".
    #[serde(default = "default_race_column")]
    pub race: usize,
    /// Pollster name.
    #[serde(default = "default_poll_column")]
    pub poll: usize,
    /// Results text, e.g. "Biden 24, Sanders 21".
    #[serde(default = "default_results_column")]
    pub results: usize,
    /// Spread text, e.g. "Biden +3".
    #[serde(default = "default_spread_column")]
    pub spread: usize,
}

fn default_race_column() -> usize {
    0
}

fn default_poll_column() -> usize {
    1
}

fn default_results_column() -> usize {
    2
}

fn default_spread_column() -> usize {
    3
}

impl Default for PollColumns {
    fn default() -> Self {
        Self {
            race: default_race_column(),
            poll: default_poll_column(),
            results: default_results_column(),
            spread: default_spread_column(),
        }
    }
}

impl PollColumns {
    pub(crate) fn max_index(&self) -> usize {
        self.race.max(self.poll).max(self.results).max(self.spread)
    }
}

/// Column positions within the delegate table. Candidate columns are located
/// by matching header cells against the tracked candidate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateColumns {
    /// State name cell, carrying a two-character marker prefix.
    #[serde(default = "default_state_column")]
    pub state: usize,
    /// Delegates cell, e.g. "41 (24%)".
    #[serde(default = "default_delegates_column")]
    pub delegates: usize,
}

fn default_state_column() -> usize {
    0
}

fn default_delegates_column() -> usize {
    1
}

impl Default for DelegateColumns {
    fn default() -> Self {
        Self {
            state: default_state_column(),
            delegates: default_delegates_column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: AggregationConfig =
            serde_yaml::from_str("candidates: [Biden, Sanders, Warren]\n").unwrap();
        assert_eq!(config.candidates.len(), 3);
        assert_eq!(config.poll_columns, PollColumns::default());
        assert_eq!(config.national_race, default_national_race());
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        let config = AggregationConfig {
            candidates: Vec::new(),
            ..AggregationConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().code(), "no-candidates");
    }
}
