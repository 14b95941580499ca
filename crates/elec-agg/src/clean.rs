use std::collections::BTreeMap;

use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::AggregationConfig;
use crate::records::{DelegateAllocation, PollRecord};
use crate::table::RawTable;

lazy_static! {
    static ref STATE_RE: Regex = Regex::new(r"([\w ]+) Democratic").unwrap();
    static ref LEADER_RE: Regex = Regex::new(r"([A-Za-z]+)").unwrap();
    static ref DELEGATES_RE: Regex = Regex::new(r"(\d+)\s\(").unwrap();
}

fn share_pattern(candidate: &str) -> Result<Regex, ElecError> {
    Regex::new(&format!(r"{}\s(\d+(?:\.\d+)?)", regex::escape(candidate))).map_err(|err| {
        ElecError::Config(
            ErrorInfo::new("candidate-pattern", err.to_string()).with_context("candidate", candidate),
        )
    })
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or("")
}

/// Turns scraped poll tables into per-state poll records.
///
/// Single-row tables carry no polls and are ignored. National polls and rows
/// whose race does not name a state are dropped.
pub fn clean_poll_tables(
    tables: &[RawTable],
    config: &AggregationConfig,
) -> Result<Vec<PollRecord>, ElecError> {
    let columns = &config.poll_columns;
    let patterns = config
        .candidates
        .iter()
        .map(|name| share_pattern(name).map(|re| (name.clone(), re)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for (table_index, table) in tables.iter().enumerate() {
        if table.len() == 1 {
            continue;
        }
        for (row_index, row) in table.body() {
            if row.len() <= columns.max_index() {
                return Err(ElecError::Table(
                    ErrorInfo::new("short-poll-row", "poll row is missing configured columns")
                        .with_context("table", table_index.to_string())
                        .with_context("row", row_index.to_string())
                        .with_context("cells", row.len().to_string()),
                ));
            }
            let race = cell(row, columns.race);
            if race == config.national_race {
                continue;
            }
            let Some(state) = STATE_RE
                .captures(race)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
            else {
                debug!("skipping poll row {row_index} of table {table_index}: no state in {race:?}");
                continue;
            };

            let results = cell(row, columns.results);
            let mut candidate_share = BTreeMap::new();
            for (name, pattern) in &patterns {
                let share = pattern
                    .captures(results)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<f64>().ok());
                candidate_share.insert(name.clone(), share);
            }
            let leader = LEADER_RE
                .captures(cell(row, columns.spread))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());

            records.push(PollRecord {
                state,
                candidate_share,
                leader,
            });
        }
    }
    debug!("cleaned {} poll records from {} tables", records.len(), tables.len());
    Ok(records)
}

/// Fraction of polls in which each candidate leads the spread.
pub fn leader_frequency(records: &[PollRecord]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for leader in records.iter().filter_map(|record| record.leader.as_ref()) {
        *counts.entry(leader.clone()).or_insert(0) += 1;
    }
    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(name, count)| (name, count as f64 / total))
        .collect()
}

/// Turns the scraped delegate-count table into per-state allocations.
///
/// A state has voted when the first tracked candidate's cell is filled; other
/// empty award cells of a voted state count as zero.
pub fn clean_delegate_table(
    table: &RawTable,
    config: &AggregationConfig,
) -> Result<Vec<DelegateAllocation>, ElecError> {
    config.validate()?;
    let header = table.header().ok_or_else(|| {
        ElecError::Table(ErrorInfo::new("empty-delegate-table", "delegate table has no header row"))
    })?;
    let mut candidate_columns = Vec::with_capacity(config.candidates.len());
    for name in &config.candidates {
        let index = header.iter().position(|h| h.trim() == name.as_str()).ok_or_else(|| {
            ElecError::Table(
                ErrorInfo::new("missing-candidate-column", "delegate table has no column for candidate")
                    .with_context("candidate", name.clone())
                    .with_hint("candidate names must match the header cells exactly"),
            )
        })?;
        candidate_columns.push((name.clone(), index));
    }

    let columns = &config.delegate_columns;
    let mut allocations = Vec::new();
    for (row_index, row) in table.body() {
        let state: String = cell(row, columns.state).chars().skip(2).collect();
        let state = state.trim().to_string();
        let Some(total) = DELEGATES_RE
            .captures(cell(row, columns.delegates))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        else {
            debug!("skipping delegate row {row_index}: no delegate count");
            continue;
        };
        if state.is_empty() {
            debug!("skipping delegate row {row_index}: empty state");
            continue;
        }

        let voted = candidate_columns
            .first()
            .map(|(_, index)| !cell(row, *index).is_empty())
            .unwrap_or(false);
        let awarded_by_candidate = if voted {
            let mut awards = BTreeMap::new();
            for (name, index) in &candidate_columns {
                awards.insert(name.clone(), parse_award(cell(row, *index), &state, name)?);
            }
            Some(awards)
        } else {
            None
        };
        allocations.push(DelegateAllocation {
            state,
            total_delegates: total,
            awarded_by_candidate,
        });
    }
    Ok(allocations)
}

fn parse_award(raw: &str, state: &str, candidate: &str) -> Result<f64, ElecError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.replace(',', "").parse::<f64>().map_err(|err| {
        ElecError::Table(
            ErrorInfo::new("bad-award", err.to_string())
                .with_context("state", state)
                .with_context("candidate", candidate)
                .with_context("value", raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_pattern_keeps_multi_word_names() {
        let caps = STATE_RE
            .captures("New Hampshire Democratic Presidential Primary")
            .unwrap();
        assert_eq!(&caps[1], "New Hampshire");
    }

    #[test]
    fn share_pattern_reads_named_candidate() {
        let re = share_pattern("Sanders").unwrap();
        let caps = re.captures("Biden 24, Sanders 21, Warren 15").unwrap();
        assert_eq!(&caps[1], "21");
    }

    #[test]
    fn empty_award_counts_as_zero() {
        assert_eq!(parse_award("", "Iowa", "Biden").unwrap(), 0.0);
        assert_eq!(parse_award("1,024", "Texas", "Biden").unwrap(), 1024.0);
        assert_eq!(parse_award("n/a", "Iowa", "Biden").unwrap_err().code(), "bad-award");
    }
}
