#![deny(missing_docs)]

//! Monte Carlo simulation of unbiased polls in swing regions: how often a
//! finite sample of a known electorate calls the eventual winner.

/// Advantage distributions and histograms.
pub mod analysis;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Win-probability estimation over many trials.
pub mod estimate;
/// Boolean victory rules over named regions.
pub mod formula;
/// Vote-share triples and regions.
pub mod params;
/// Multinomial draws and the advantage statistic.
pub mod sample;
/// Region sets paired with a win rule.
pub mod scenario;

pub use analysis::{advantage_distribution, advantage_samples, AdvantageDistribution, Histogram};
pub use config::{ScenarioConfig, SeedPolicy, SimulationConfig};
pub use estimate::{estimate_win_probability, EstimateOpts, WinEstimate};
pub use formula::WinFormula;
pub use params::{Region, VoteShareParams};
pub use sample::{advantage, draw_sample, is_win, region_won, SampleDraw};
pub use scenario::{Scenario, SWING_2016_RULE};
