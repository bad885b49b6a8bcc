//! Benchmarks for the yearly extremum and phase searches on analytic skies.
//!
//!   cargo bench --bench alignment_search

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hifitime::Epoch;

use moon_almanac::{
    alignments::angular_difference::wrap_longitude_difference,
    search::{discrete::find_discrete, extremum::find_maxima, SearchConfig},
    time::{days_between, year_bounds},
};

/// Moon-planet longitude difference sweeping 13.2° a day, with a slow wobble.
fn synthetic_diff(start: &Epoch, t: &Epoch) -> f64 {
    let x = days_between(start, t);
    let moon = 13.2 * x + 6.3 * (x / 27.55 * std::f64::consts::TAU).sin();
    wrap_longitude_difference(moon.rem_euclid(360.0), 120.0)
}

fn bench_find_maxima(c: &mut Criterion) {
    let (start, end) = year_bounds(2026);
    let config = SearchConfig::alignment();

    c.bench_function("find_maxima/one_year", |b| {
        b.iter(|| {
            let maxima = find_maxima(
                &start,
                &end,
                |t| Ok(-synthetic_diff(&start, t).abs()),
                black_box(&config),
            )
            .unwrap();
            black_box(maxima)
        })
    });
}

fn bench_find_discrete(c: &mut Criterion) {
    let (start, end) = year_bounds(2026);
    let config = SearchConfig::moon_phase();

    c.bench_function("find_discrete/one_year_quarters", |b| {
        b.iter(|| {
            let changes = find_discrete(
                &start,
                &end,
                |t| {
                    let elongation = (12.19 * days_between(&start, t)).rem_euclid(360.0);
                    Ok((elongation / 90.0) as u8)
                },
                black_box(&config),
            )
            .unwrap();
            black_box(changes)
        })
    });
}

criterion_group!(benches, bench_find_maxima, bench_find_discrete);
criterion_main!(benches);
