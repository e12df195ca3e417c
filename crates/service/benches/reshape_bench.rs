use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::stats::{reshape, GroupedRow, StatsService};
use service::stats::query::mock::MockStatsQuery;

fn sample_rows(per_set: usize) -> Vec<GroupedRow> {
    let mut rows = Vec::with_capacity(per_set * 3 + 1);
    for i in 0..per_set {
        rows.push(GroupedRow::only_a(format!("A{}", i), 3, Some(450.0)));
    }
    for i in 0..per_set {
        rows.push(GroupedRow::only_b(format!("B{}", i), 2, Some(200.0)));
    }
    for i in 0..per_set {
        rows.push(GroupedRow::only_c(format!("C{}", i), 1, None));
    }
    rows.push(GroupedRow::grand_total((per_set * 6) as i64, Some(per_set as f64 * 650.0)));
    rows
}

fn bench_reshape(c: &mut Criterion) {
    let rows = sample_rows(3_333);
    c.bench_function("reshape_10k_rows", |b| {
        b.iter(|| reshape(black_box(rows.clone())))
    });
}

fn bench_by_category(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = StatsService::new(Arc::new(MockStatsQuery::with_rows(sample_rows(100))));
    c.bench_function("stats_by_category_mock", |b| {
        b.iter(|| rt.block_on(svc.by_category()).unwrap());
    });
}

criterion_group!(benches, bench_reshape, bench_by_category);
criterion_main!(benches);
