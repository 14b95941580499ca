use std::collections::BTreeMap;

use elec_core::errors::ErrorInfo;
use elec_core::{ElecError, RngHandle};
use indexmap::IndexMap;
use serde::Serialize;

use crate::formula::WinFormula;
use crate::params::{Region, VoteShareParams};
use crate::sample::{self, SampleDraw};

/// The swing-state rule: the three decisive states, or Florida plus any one of them.
pub const SWING_2016_RULE: &str =
    "(Michigan & Pennsylvania & Wisconsin) | (Florida & (Michigan | Pennsylvania | Wisconsin))";

/// A named set of regions and the rule deciding overall victory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    name: String,
    regions: IndexMap<String, Region>,
    win_rule: WinFormula,
}

impl Scenario {
    /// Validates and builds a scenario.
    ///
    /// Region names must be unique and every region named by `win_rule` must
    /// be present.
    pub fn new(
        name: impl Into<String>,
        regions: Vec<Region>,
        win_rule: WinFormula,
    ) -> Result<Self, ElecError> {
        let name = name.into();
        if regions.is_empty() {
            return Err(ElecError::InsufficientData(
                ErrorInfo::new("no-regions", "scenario has no regions").with_context("scenario", name),
            ));
        }
        let mut by_name = IndexMap::with_capacity(regions.len());
        for region in regions {
            if by_name.contains_key(&region.name) {
                return Err(ElecError::Config(
                    ErrorInfo::new("duplicate-region", "region listed twice")
                        .with_context("scenario", name)
                        .with_context("region", region.name),
                ));
            }
            by_name.insert(region.name.clone(), region);
        }
        if let Some(missing) = win_rule
            .required_regions()
            .into_iter()
            .find(|region| !by_name.contains_key(*region))
        {
            return Err(ElecError::Formula(
                ErrorInfo::new("unknown-region", "win rule names a region the scenario lacks")
                    .with_context("scenario", name.clone())
                    .with_context("region", missing)
                    .with_hint("add the region or fix its spelling in the win rule"),
            ));
        }
        Ok(Self {
            name,
            regions: by_name,
            win_rule,
        })
    }

    /// 2016 results in Florida, Michigan, Pennsylvania and Wisconsin, with
    /// Trump as the tracked candidate and Clinton as the opponent.
    pub fn swing_2016() -> Result<Self, ElecError> {
        let regions = vec![
            Region::new("Florida", VoteShareParams::with_remainder(0.4902, 0.4782)?, 29)
                .with_turnout(9_419_886),
            Region::new("Michigan", VoteShareParams::with_remainder(0.475, 0.4727)?, 16)
                .with_turnout(4_799_284),
            Region::new("Pennsylvania", VoteShareParams::with_remainder(0.4818, 0.4746)?, 20)
                .with_turnout(6_165_478),
            Region::new("Wisconsin", VoteShareParams::with_remainder(0.4722, 0.4645)?, 10)
                .with_turnout(2_976_150),
        ];
        Self::new("swing-2016", regions, WinFormula::parse(SWING_2016_RULE)?)
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Victory rule.
    pub fn win_rule(&self) -> &WinFormula {
        &self.win_rule
    }

    /// Regions in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.values()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false for a validated scenario.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Looks a region up by name.
    pub fn region(&self, name: &str) -> Result<&Region, ElecError> {
        self.regions.get(name).ok_or_else(|| {
            ElecError::InsufficientData(
                ErrorInfo::new("unknown-region", "scenario has no such region")
                    .with_context("scenario", self.name.clone())
                    .with_context("region", name),
            )
        })
    }

    /// Draws one poll of `n` respondents in the named region.
    pub fn draw_sample(
        &self,
        n: u64,
        region: &str,
        rng: &mut RngHandle,
    ) -> Result<SampleDraw, ElecError> {
        let region = self.region(region)?;
        sample::draw_sample(n, &region.params, rng).map_err(|err| sample::with_region(err, region))
    }

    /// Total electoral votes across the scenario's regions.
    pub fn electoral_votes(&self) -> u32 {
        self.regions.values().map(|region| region.electoral_votes).sum()
    }

    /// Applies the win rule to forced per-region outcomes.
    pub fn outcome_from(&self, outcomes: &BTreeMap<String, bool>) -> Result<bool, ElecError> {
        self.win_rule.evaluate(outcomes)
    }

    /// Runs one trial: polls `n` voters in every region once, then applies the
    /// win rule to the per-region results.
    pub fn outcome_wins(&self, n: u64, rng: &mut RngHandle) -> Result<bool, ElecError> {
        let mut outcomes = BTreeMap::new();
        for region in self.regions.values() {
            outcomes.insert(region.name.clone(), sample::region_won(n, region, rng)?);
        }
        self.outcome_from(&outcomes)
    }
}
