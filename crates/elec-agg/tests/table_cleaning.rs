use std::io::Write;

use elec_agg::project::aggregate_tables;
use elec_agg::{
    clean_delegate_table, clean_poll_tables, leader_frequency, AggregationConfig, RawTable,
};

fn poll_tables() -> Vec<RawTable> {
    vec![
        RawTable::from_strs(&[&["Race", "Poll", "Results", "Spread"]]),
        RawTable::from_strs(&[
            &["Race", "Poll", "Results", "Spread"],
            &[
                "2020 Democratic Presidential Nomination",
                "Economist/YouGov",
                "Biden 28, Sanders 24, Warren 16",
                "Biden +4",
            ],
            &[
                "Iowa Democratic Presidential Caucus",
                "Des Moines Register",
                "Sanders 20, Warren 17, Biden 15",
                "Sanders +3",
            ],
            &[
                "Iowa Democratic Presidential Caucus",
                "Emerson",
                "Sanders 28, Biden 21",
                "Sanders +7",
            ],
            &[
                "New Hampshire Democratic Presidential Primary",
                "CNN/UNH",
                "Sanders 29, Buttigieg 22",
                "Sanders +7",
            ],
            &["General Election: Trump vs. Biden", "Quinnipiac", "Biden 50, Trump 43", "Biden +7"],
        ]),
    ]
}

fn delegate_table() -> RawTable {
    RawTable::from_strs(&[
        &["State", "Delegates*", "Biden", "Sanders", "Warren"],
        &["* Iowa", "41 (1%)", "6", "", "8"],
        &["* New Hampshire", "24 (1%)", "", "", ""],
        &["* Nevada", "36 (1%)", "9", "24", ""],
        &["Totals", "", "", "", ""],
    ])
}

#[test]
fn poll_tables_clean_into_state_records() {
    let config = AggregationConfig::default();
    let records = clean_poll_tables(&poll_tables(), &config).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.state != "2020"));
    assert_eq!(records[0].state, "Iowa");
    assert_eq!(records[0].share("Biden"), Some(15.0));
    assert_eq!(records[0].share("Sanders"), Some(20.0));
    assert_eq!(records[2].state, "New Hampshire");
    assert_eq!(records[2].share("Biden"), None);
    assert_eq!(records[2].leader.as_deref(), Some("Sanders"));
}

#[test]
fn leader_frequency_counts_spread_leaders() {
    let records = clean_poll_tables(&poll_tables(), &AggregationConfig::default()).unwrap();
    let freq = leader_frequency(&records);
    assert_eq!(freq.len(), 1);
    assert!((freq["Sanders"] - 1.0).abs() < 1e-12);
}

#[test]
fn short_poll_row_reports_position() {
    let tables = vec![RawTable::from_strs(&[
        &["Race", "Poll", "Results", "Spread"],
        &["Iowa Democratic Presidential Caucus", "Emerson"],
    ])];
    let err = clean_poll_tables(&tables, &AggregationConfig::default()).unwrap_err();
    assert_eq!(err.code(), "short-poll-row");
    assert_eq!(err.info().context["row"], "1");
}

#[test]
fn delegate_table_marks_voted_states() {
    let allocations = clean_delegate_table(&delegate_table(), &AggregationConfig::default()).unwrap();
    assert_eq!(allocations.len(), 3);

    let iowa = &allocations[0];
    assert_eq!(iowa.state, "Iowa");
    assert_eq!(iowa.total_delegates, 41);
    let awards = iowa.awarded_by_candidate.as_ref().expect("iowa voted");
    assert_eq!(awards["Biden"], 6.0);
    assert_eq!(awards["Sanders"], 0.0);

    assert_eq!(allocations[1].state, "New Hampshire");
    assert!(!allocations[1].has_voted());
}

#[test]
fn missing_candidate_column_is_reported() {
    let mut config = AggregationConfig::default();
    config.candidates.push("Bloomberg".into());
    let err = clean_delegate_table(&delegate_table(), &config).unwrap_err();
    assert_eq!(err.code(), "missing-candidate-column");
    assert_eq!(err.info().context["candidate"], "Bloomberg");
}

#[test]
fn tables_flow_through_whole_pipeline() {
    let report =
        aggregate_tables(&poll_tables(), &delegate_table(), &AggregationConfig::default()).unwrap();
    // Iowa and Nevada are authoritative; New Hampshire is projected from one poll.
    assert_eq!(report.national.states_included, 3);
    assert_eq!(report.national.tracked_delegates, 41 + 24 + 36);
    let sanders = report.national.by_candidate["Sanders"].delegates;
    assert!((sanders - (0.0 + 24.0 * 0.29 + 24.0)).abs() < 1e-9);
    let biden = report.national.by_candidate["Biden"].delegates;
    assert!((biden - 15.0).abs() < 1e-9);
}

#[test]
fn config_loads_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "candidates: [Biden, Sanders, Warren]").unwrap();
    writeln!(file, "poll_columns:\n  results: 2\n  spread: 3").unwrap();
    let config = AggregationConfig::load(file.path()).unwrap();
    assert_eq!(config.candidates.len(), 3);
    assert_eq!(config.delegate_columns.delegates, 1);
}
