use elec_core::provenance::{RunProvenance, SchemaVersion};
use elec_core::{is_probability, sums_to_one};

#[test]
fn provenance_round_trip_json() {
    let provenance = RunProvenance::stamp(99, Some("workshop".into())).with_tool("elec-mc", "0.1.0");
    assert_eq!(provenance.schema_version, SchemaVersion::new(1, 0, 0));
    assert!(provenance.tool_versions.contains_key("elec-core"));

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, provenance);
}

#[test]
fn share_tolerance_helpers() {
    assert!(sums_to_one(0.4902 + 0.4782 + (1.0 - (0.4902 + 0.4782))));
    assert!(sums_to_one(1.0 + 5e-10));
    assert!(!sums_to_one(0.99));
    assert!(is_probability(0.0));
    assert!(!is_probability(-0.1));
    assert!(!is_probability(f64::NAN));
}
