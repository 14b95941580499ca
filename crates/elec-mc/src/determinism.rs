use elec_core::{derive_substream_seed, RngHandle};

/// Derives the deterministic seed used by one estimation worker.
pub fn worker_seed(master_seed: u64, worker: usize) -> u64 {
    derive_substream_seed(master_seed, worker as u64)
}

/// RNG handle for one estimation worker.
pub fn worker_rng(master_seed: u64, worker: usize) -> RngHandle {
    RngHandle::from_seed(worker_seed(master_seed, worker))
}

/// Deterministic seed for the advantage distribution of one region.
pub fn distribution_seed(master_seed: u64, region_index: usize) -> u64 {
    derive_substream_seed(
        master_seed ^ 0xA5A5_A5A5_A5A5_A5A5,
        region_index as u64,
    )
}

/// Splits `trials` into `workers` contiguous chunks whose sizes differ by at
/// most one.
pub fn chunk_sizes(trials: u64, workers: usize) -> Vec<u64> {
    let workers = (workers.max(1) as u64).min(trials.max(1));
    let base = trials / workers;
    let remainder = trials % workers;
    (0..workers)
        .map(|index| base + u64::from(index < remainder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_cover_all_trials() {
        assert_eq!(chunk_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(chunk_sizes(2, 8), vec![1, 1]);
        assert_eq!(chunk_sizes(7, 0), vec![7]);
        assert_eq!(chunk_sizes(100_000, 4).iter().sum::<u64>(), 100_000);
    }

    #[test]
    fn worker_streams_differ() {
        assert_ne!(worker_seed(1, 0), worker_seed(1, 1));
        assert_ne!(worker_seed(1, 0), distribution_seed(1, 0));
    }
}
