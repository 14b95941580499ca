use std::io::Write;

use elec_mc::{SimulationConfig, SWING_2016_RULE};

#[test]
fn empty_document_uses_workshop_defaults() {
    let config = SimulationConfig::from_yaml("{}").unwrap();
    assert_eq!(config.sample_size, 1500);
    assert_eq!(config.trials, 100_000);
    assert_eq!(config.workers, 1);
    assert_eq!(config.histogram_bins, 10);
    let scenario = config.scenario().unwrap();
    assert_eq!(scenario.name(), "swing-2016");
    assert_eq!(scenario.len(), 4);
    assert_eq!(scenario.electoral_votes(), 75);
    assert_eq!(scenario.win_rule().to_string(), SWING_2016_RULE);
}

#[test]
fn custom_scenario_loads_from_file() {
    let yaml = r#"
sample_size: 800
trials: 5000
workers: 2
seed_policy:
  master_seed: 42
  label: rust-belt
scenario:
  name: rust-belt
  regions:
    - name: Ohio
      candidate: 0.516
      opponent: 0.436
      electoral_votes: 18
    - name: Iowa
      candidate: 0.511
      opponent: 0.417
      other: 0.072
      electoral_votes: 6
      turnout: 1566031
  win_rule: "Ohio & Iowa"
"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = SimulationConfig::load(file.path()).unwrap();
    let opts = config.estimate_opts();
    assert_eq!(opts.seed, Some(42));
    assert_eq!(opts.seed_label.as_deref(), Some("rust-belt"));
    assert_eq!(opts.workers, 2);

    let scenario = config.scenario().unwrap();
    assert_eq!(scenario.name(), "rust-belt");
    let iowa = scenario.region("Iowa").unwrap();
    assert_eq!(iowa.turnout, Some(1_566_031));
    assert!((scenario.region("Ohio").unwrap().params.other() - 0.048).abs() < 1e-12);
}

#[test]
fn invalid_shares_fail_to_load() {
    let yaml = r#"
scenario:
  regions:
    - name: Ohio
      candidate: 0.6
      opponent: 0.6
      electoral_votes: 18
  win_rule: Ohio
"#;
    let err = SimulationConfig::from_yaml(yaml).unwrap_err();
    assert_eq!(err.code(), "simulation-config-parse");
}

#[test]
fn malformed_rule_fails_to_load() {
    let yaml = "scenario:\n  regions: []\n  win_rule: \"Ohio &\"\n";
    assert!(SimulationConfig::from_yaml(yaml).is_err());
}

#[test]
fn rule_naming_unknown_region_fails_at_build() {
    let yaml = r#"
scenario:
  regions:
    - name: Ohio
      candidate: 0.5
      opponent: 0.4
      electoral_votes: 18
  win_rule: "Ohio | Iowa"
"#;
    let config = SimulationConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.scenario().unwrap_err().code(), "unknown-region");
}

#[test]
fn regions_accept_lead_as_candidate_share() {
    let yaml = r#"
scenario:
  regions:
    - name: Ohio
      lead: 0.516
      opponent: 0.436
      electoral_votes: 18
  win_rule: Ohio
"#;
    let scenario = SimulationConfig::from_yaml(yaml).unwrap().scenario().unwrap();
    let ohio = scenario.region("Ohio").unwrap();
    assert_eq!(ohio.params.candidate(), 0.516);
    assert!((ohio.params.other() - 0.048).abs() < 1e-12);
}

#[test]
fn lead_and_candidate_together_fail_to_load() {
    let yaml = r#"
scenario:
  regions:
    - name: Ohio
      lead: 0.516
      candidate: 0.516
      opponent: 0.436
      electoral_votes: 18
  win_rule: Ohio
"#;
    let err = SimulationConfig::from_yaml(yaml).unwrap_err();
    assert_eq!(err.code(), "simulation-config-parse");
}
