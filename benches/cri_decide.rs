use std::str::FromStr;

use criterion::{criterion_group, criterion_main, Criterion};

use trio::decision::{decide, Decision};
use trio::odds::{Odds, OddsTable};
use trio::stake::{allocate, Budget};
use trio::ticket::Ticket;

fn criterion_benchmark(c: &mut Criterion) {
    fn odds_table(quotes: &[(&str, f64)]) -> OddsTable {
        quotes
            .iter()
            .map(|&(id, decimal)| (Ticket::from_str(id).unwrap(), Odds::try_from(decimal).unwrap()))
            .collect()
    }

    let budget = Budget::default();
    {
        let odds = odds_table(&[("235", 10.0), ("234", 10.0), ("345", 10.0)]);

        // sanity check
        assert!(matches!(decide("32547", &odds, &budget).unwrap(), Decision::Purchase(_)));
        c.bench_function("cri_decide_first", |b| {
            b.iter(|| decide("32547", &odds, &budget));
        });
    }
    {
        let odds = odds_table(&[
            ("235", 5.0),
            ("234", 5.0),
            ("237", 5.0),
            ("345", 5.0),
            ("357", 5.0),
        ]);
        assert!(matches!(decide("32547", &odds, &budget).unwrap(), Decision::Skip { .. }));
        c.bench_function("cri_decide_skip", |b| {
            b.iter(|| decide("32547", &odds, &budget));
        });
    }
    {
        let odds = [50.0, 80.0, 120.0].map(|decimal| Odds::try_from(decimal).unwrap());
        let budget = Budget::new(100_000, 100, 2_500).unwrap();
        c.bench_function("cri_decide_allocate_1000_units", |b| {
            b.iter(|| allocate(&odds, &budget));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
