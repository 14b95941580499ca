use criterion::{criterion_group, criterion_main, Criterion};
use elec_core::RngHandle;

use elec_mc::{estimate_win_probability, EstimateOpts, Scenario};

fn bench_trials(c: &mut Criterion) {
    let scenario = Scenario::swing_2016().unwrap();

    c.bench_function("outcome_wins_n1500", |b| {
        let mut rng = RngHandle::from_seed(42);
        b.iter(|| scenario.outcome_wins(1500, &mut rng).unwrap())
    });

    c.bench_function("estimate_10k_trials", |b| {
        let opts = EstimateOpts::seeded(42);
        b.iter(|| estimate_win_probability(&scenario, 1500, 10_000, &opts).unwrap())
    });
}

criterion_group!(benches, bench_trials);
criterion_main!(benches);
