//! Benchmarks for similarity lookups
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic 5000-movie catalog, roughly the size of the TMDB 5000
//! dataset the artifact is usually built from.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{CatalogData, CatalogEntry, MovieId, Score};
use similarity::{DEFAULT_RECOMMENDATIONS, SimilarityIndex};
use std::sync::Arc;

fn synthetic_index(n: usize) -> SimilarityIndex {
    let entries = (0..n)
        .map(|i| CatalogEntry::new(i as MovieId, format!("Movie {}", i)))
        .collect();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 1.0 } else { ((i * 31 + j * 17) % 997) as Score / 997.0 })
                .collect()
        })
        .collect();
    let catalog = CatalogData::from_parts(entries, rows).expect("Failed to build catalog");
    SimilarityIndex::new(Arc::new(catalog))
}

fn bench_recommend_by_title(c: &mut Criterion) {
    let index = synthetic_index(5000);

    c.bench_function("recommend_by_title", |b| {
        b.iter(|| {
            let recs = index.recommend(black_box("Movie 4321"), black_box(DEFAULT_RECOMMENDATIONS));
            black_box(recs)
        })
    });
}

fn bench_recommend_by_id(c: &mut Criterion) {
    let index = synthetic_index(5000);

    c.bench_function("recommend_by_id", |b| {
        b.iter(|| {
            let recs = index.recommend_by_id(black_box(4321), black_box(DEFAULT_RECOMMENDATIONS));
            black_box(recs)
        })
    });
}

criterion_group!(benches, bench_recommend_by_title, bench_recommend_by_id);
criterion_main!(benches);
