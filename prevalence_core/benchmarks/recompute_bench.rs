use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use prevalence_core::{
    Dashboard, DashboardConfig, DashboardViews, Dataset, Disorder, FilterState, Record,
    DISORDER_COUNT,
};

fn synthetic_dataset(countries: usize, years: i32) -> Dataset {
    let mut records = Vec::with_capacity(countries * years as usize);
    for year in 1990..1990 + years {
        for country in 0..countries {
            let mut metrics = [None; DISORDER_COUNT];
            for (index, slot) in metrics.iter_mut().enumerate() {
                let step = (country * 31 + index * 17 + year as usize) % 97;
                *slot = Some(step as f64 / 10.0);
            }
            let letter = (b'A' + (country % 26) as u8) as char;
            let code = format!("{letter}{:02}", country % 100);
            records.push(Record::new(
                format!("Country {country}"),
                Some(&code),
                year,
                metrics,
            ));
        }
    }
    Dataset::from_records(records).expect("synthetic dataset is non-empty")
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    let config = DashboardConfig::builtin();

    for countries in [50usize, 200, 800] {
        let dataset = Arc::new(synthetic_dataset(countries, 30));
        let filter = FilterState::new(
            2019,
            Disorder::Depression,
            ["Country 1", "Country 2", "Country 3"],
        );

        group.bench_with_input(
            BenchmarkId::new("full", countries),
            &countries,
            |b, _| b.iter(|| DashboardViews::compute(&dataset, &config, &filter)),
        );

        group.bench_with_input(
            BenchmarkId::new("year_change", countries),
            &countries,
            |b, _| {
                b.iter_batched(
                    || Dashboard::with_filter(dataset.clone(), config.clone(), filter.clone()),
                    |mut dashboard| {
                        let next = dashboard.filter().with_year(2000);
                        dashboard.apply(next)
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(recompute_benches, bench_recompute);
criterion_main!(recompute_benches);
