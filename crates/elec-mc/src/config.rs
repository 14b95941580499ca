use std::fs;
use std::path::Path;

use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use serde::{Deserialize, Serialize};

use crate::estimate::EstimateOpts;
use crate::formula::WinFormula;
use crate::params::Region;
use crate::scenario::Scenario;

/// YAML-configurable parameters governing a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Respondents polled per region in each trial.
    #[serde(default = "default_sample_size")]
    pub sample_size: u64,
    /// Number of independent trials.
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Workers sharing the trials.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Buckets used for advantage histograms.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Regions and win rule. Omitted means the built-in 2016 swing states.
    #[serde(default)]
    pub scenario: Option<ScenarioConfig>,
}

fn default_sample_size() -> u64 {
    1500
}

fn default_trials() -> u64 {
    100_000
}

fn default_workers() -> usize {
    1
}

fn default_histogram_bins() -> usize {
    10
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            trials: default_trials(),
            seed_policy: SeedPolicy::default(),
            workers: default_workers(),
            histogram_bins: default_histogram_bins(),
            scenario: None,
        }
    }
}

/// Seeding configuration. Without a master seed every invocation draws a
/// fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default)]
    pub master_seed: Option<u64>,
    /// Optional label recorded in the provenance.
    #[serde(default)]
    pub label: Option<String>,
}

/// Regions and win rule as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario name used in reports.
    #[serde(default = "default_scenario_name")]
    pub name: String,
    /// Regions in declaration order.
    pub regions: Vec<Region>,
    /// Victory rule over region names.
    pub win_rule: WinFormula,
}

fn default_scenario_name() -> String {
    "custom".to_string()
}

impl SimulationConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ElecError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            ElecError::Config(
                ErrorInfo::new("simulation-config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml(&contents).map_err(|err| match err {
            ElecError::Config(info) => {
                ElecError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ElecError> {
        serde_yaml::from_str(contents)
            .map_err(|err| ElecError::config("simulation-config-parse", err))
    }

    /// Builds the configured scenario, falling back to the 2016 swing states.
    pub fn scenario(&self) -> Result<Scenario, ElecError> {
        match &self.scenario {
            Some(config) => Scenario::new(
                config.name.clone(),
                config.regions.clone(),
                config.win_rule.clone(),
            ),
            None => Scenario::swing_2016(),
        }
    }

    /// Estimation options derived from the seed policy and worker count.
    pub fn estimate_opts(&self) -> EstimateOpts {
        EstimateOpts {
            seed: self.seed_policy.master_seed,
            seed_label: self.seed_policy.label.clone(),
            workers: self.workers,
        }
    }
}
