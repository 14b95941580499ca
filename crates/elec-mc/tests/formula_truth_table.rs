use std::collections::BTreeMap;

use elec_core::ElecError;
use elec_mc::{Region, Scenario, VoteShareParams, WinFormula};

fn outcomes(florida: bool, michigan: bool, pennsylvania: bool, wisconsin: bool) -> BTreeMap<String, bool> {
    [
        ("Florida", florida),
        ("Michigan", michigan),
        ("Pennsylvania", pennsylvania),
        ("Wisconsin", wisconsin),
    ]
    .into_iter()
    .map(|(name, won)| (name.to_string(), won))
    .collect()
}

fn reference_rule(f: bool, m: bool, p: bool, w: bool) -> bool {
    (m && p && w) || (f && (m || p || w))
}

#[test]
fn swing_rule_truth_table() {
    let scenario = Scenario::swing_2016().unwrap();
    assert!(scenario.outcome_from(&outcomes(true, true, true, true)).unwrap());
    assert!(!scenario.outcome_from(&outcomes(true, false, false, false)).unwrap());
    assert!(scenario.outcome_from(&outcomes(false, true, true, true)).unwrap());
    assert!(scenario.outcome_from(&outcomes(true, true, false, false)).unwrap());
}

#[test]
fn swing_rule_matches_reference_on_all_inputs() {
    let scenario = Scenario::swing_2016().unwrap();
    for bits in 0u8..16 {
        let (f, m, p, w) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
        assert_eq!(
            scenario.outcome_from(&outcomes(f, m, p, w)).unwrap(),
            reference_rule(f, m, p, w),
            "bits {bits:04b}"
        );
    }
}

#[test]
fn formula_over_other_regions_swaps_in() {
    let params = VoteShareParams::with_remainder(0.5, 0.45).unwrap();
    let regions = vec![
        Region::new("Arizona", params, 11),
        Region::new("Georgia", params, 16),
        Region::new("Nevada", params, 6),
    ];
    let rule = WinFormula::parse("Georgia & (Arizona | Nevada)").unwrap();
    let scenario = Scenario::new("sun-belt", regions, rule).unwrap();
    assert_eq!(scenario.electoral_votes(), 33);

    let mut forced = BTreeMap::new();
    forced.insert("Arizona".to_string(), false);
    forced.insert("Georgia".to_string(), true);
    forced.insert("Nevada".to_string(), true);
    assert!(scenario.outcome_from(&forced).unwrap());
    forced.insert("Georgia".to_string(), false);
    assert!(!scenario.outcome_from(&forced).unwrap());
}

#[test]
fn rule_naming_missing_region_is_rejected() {
    let params = VoteShareParams::with_remainder(0.5, 0.45).unwrap();
    let regions = vec![Region::new("Ohio", params, 18)];
    let err = Scenario::new("bad", regions, WinFormula::parse("Ohio & Iowa").unwrap()).unwrap_err();
    assert!(matches!(err, ElecError::Formula(_)));
    assert_eq!(err.info().context["region"], "Iowa");
}

#[test]
fn duplicate_regions_are_rejected() {
    let params = VoteShareParams::with_remainder(0.5, 0.45).unwrap();
    let regions = vec![Region::new("Ohio", params, 18), Region::new("Ohio", params, 18)];
    let err = Scenario::new("dup", regions, WinFormula::region("Ohio")).unwrap_err();
    assert_eq!(err.code(), "duplicate-region");
}

#[test]
fn missing_outcome_is_reported() {
    let rule = WinFormula::parse("Florida | Ohio").unwrap();
    let mut partial = BTreeMap::new();
    partial.insert("Florida".to_string(), false);
    let err = rule.evaluate(&partial).unwrap_err();
    assert_eq!(err.code(), "unknown-region");
}

#[test]
fn unknown_region_lookup_is_insufficient_data() {
    let scenario = Scenario::swing_2016().unwrap();
    assert_eq!(scenario.region("Florida").unwrap().electoral_votes, 29);
    let err = scenario.region("Ohio").unwrap_err();
    assert!(matches!(err, ElecError::InsufficientData(_)));
}
