use std::collections::BTreeMap;

use crate::records::{PollRecord, StatePollAverage};

/// Averages each candidate's share over all polls of a state.
///
/// Unknown shares are left out of the mean rather than counted as zero, so a
/// candidate is only absent from the result when no poll of the state named
/// them.
pub fn average_by_state(records: &[PollRecord]) -> BTreeMap<String, StatePollAverage> {
    let mut sums: BTreeMap<&str, (usize, BTreeMap<&str, (f64, usize)>)> = BTreeMap::new();
    for record in records {
        let (polls, candidates) = sums.entry(record.state.as_str()).or_default();
        *polls += 1;
        for (name, share) in &record.candidate_share {
            if let Some(share) = share {
                let slot = candidates.entry(name.as_str()).or_insert((0.0, 0));
                slot.0 += share;
                slot.1 += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(state, (poll_count, candidates))| {
            let mean_share_by_candidate = candidates
                .into_iter()
                .map(|(name, (sum, count))| (name.to_string(), sum / count as f64))
                .collect();
            (
                state.to_string(),
                StatePollAverage {
                    state: state.to_string(),
                    mean_share_by_candidate,
                    poll_count,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_shares_do_not_drag_the_mean() {
        let mut partial = PollRecord::new("Iowa", [("Biden", 20.0)]);
        partial.candidate_share.insert("Sanders".into(), None);
        let records = vec![
            PollRecord::new("Iowa", [("Biden", 30.0), ("Sanders", 24.0)]),
            partial,
        ];
        let averages = average_by_state(&records);
        let iowa = &averages["Iowa"];
        assert_eq!(iowa.poll_count, 2);
        assert_eq!(iowa.mean_share_by_candidate["Biden"], 25.0);
        assert_eq!(iowa.mean_share_by_candidate["Sanders"], 24.0);
    }
}
