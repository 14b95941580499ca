#![deny(missing_docs)]

//! Poll and delegate aggregation: cleans raw poll tables, averages shares per
//! state and blends them with authoritative delegate awards.

/// Per-state averaging of cleaned poll records.
pub mod average;
/// Cleaning of raw scraped rows into typed records.
pub mod clean;
/// YAML configuration and defaults for the aggregation pipeline.
pub mod config;
/// Projection, override precedence and national rollup.
pub mod project;
/// Value objects passed between the pipeline stages.
pub mod records;
/// Raw index-addressed tables handed over by the fetch collaborator.
pub mod table;

pub use average::average_by_state;
pub use clean::{clean_delegate_table, clean_poll_tables, leader_frequency};
pub use config::{AggregationConfig, DelegateColumns, PollColumns};
pub use project::{
    aggregate, aggregate_tables, national_rollup, project_state, CandidateTotal, NationalRollup, ProjectionReport,
    StateOutcome,
};
pub use records::{
    DelegateAllocation, PollRecord, ProjectionSource, StatePollAverage, StateProjection,
};
pub use table::RawTable;
