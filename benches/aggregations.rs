use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use volcano_explorer::processing::{elevation, geo, ranking, TieBreak};
use volcano_explorer::types::{Catalog, CategoricalField, VolcanoRecord};

const COUNTRIES: [&str; 8] = [
    "Chile", "Japan", "Indonesia", "Peru", "Italy", "Iceland", "Russia", "United States",
];
const ROCKS: [&str; 4] = [
    "Andesite / Basaltic Andesite",
    "Basalt / Picro-Basalt",
    "Dacite",
    "Rhyolite",
];

fn synthetic_catalog(rows: usize) -> Catalog {
    let records = (0..rows)
        .map(|i| {
            let mut r = VolcanoRecord::new(
                format!("v{i}"),
                COUNTRIES[i % COUNTRIES.len()],
                (i as i64 * 37) % 6000 - 200,
            );
            r.latitude = (i % 180) as f64 - 90.0;
            r.longitude = (i % 360) as f64 - 180.0;
            r.dominant_rock_type = Some(ROCKS[(i / 3) % ROCKS.len()].to_string());
            r
        })
        .collect();
    Catalog::new(records)
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for rows in [1_000usize, 10_000] {
        let catalog = synthetic_catalog(rows);
        group.bench_with_input(BenchmarkId::new("country_top5", rows), &catalog, |b, catalog| {
            b.iter(|| ranking::rank_values(black_box(catalog), CategoricalField::Country, 5, TieBreak::FirstSeen));
        });
        group.bench_with_input(BenchmarkId::new("rock_alphabetical", rows), &catalog, |b, catalog| {
            b.iter(|| {
                ranking::rank_values(
                    black_box(catalog),
                    CategoricalField::DominantRockType,
                    4,
                    TieBreak::Alphabetical,
                )
            });
        });
    }

    group.finish();
}

fn bench_geo(c: &mut Criterion) {
    let mut group = c.benchmark_group("geo");

    let catalog = synthetic_catalog(10_000);
    group.bench_function("locate_one_country", |b| {
        b.iter(|| geo::locate(black_box(&catalog), black_box("Japan")));
    });
    group.bench_function("country_choices", |b| {
        b.iter(|| geo::country_choices(black_box(&catalog)));
    });

    group.finish();
}

fn bench_elevation(c: &mut Criterion) {
    let mut group = c.benchmark_group("elevation");

    let catalog = synthetic_catalog(10_000);
    let selection = ["Chile", "Japan", "Indonesia", "Peru", "Italy"];
    group.bench_function("aggregate_five_countries", |b| {
        b.iter(|| elevation::aggregate(black_box(&catalog), black_box(&selection)));
    });
    group.bench_function("eligible_countries", |b| {
        b.iter(|| elevation::eligible_countries(black_box(&catalog)));
    });

    group.finish();
}

criterion_group!(benches, bench_ranking, bench_geo, bench_elevation);
criterion_main!(benches);
