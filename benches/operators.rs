use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pattern_ops::pattern::{and, var};
use pattern_ops::{
    apply_chain, apply_parallel, Conjunction, DriverConfig, Operator, Operators, SchemaContext,
};

fn schema() -> SchemaContext {
    SchemaContext::new()
        .with_subtype("baseEntity", "entity")
        .with_subtype("subEntity", "baseEntity")
        .with_subtype("baseRelation", "relation")
        .with_subtype("subRelation", "baseRelation")
        .with_subtype("baseRole", "role")
        .with_subtype("subRole", "baseRole")
}

/// A relation with `players` typed role-players, each pinned to an iid and
/// owning a numeric attribute.
fn star(players: usize) -> Conjunction {
    let mut relation = var("r").isa("subRelation");
    let mut statements = Vec::with_capacity(players + 1);
    for i in 0..players {
        let name = format!("x{i}");
        relation = relation.rel_role("subRole", var(name.as_str()));
        statements.push(
            var(name.as_str())
                .isa("subEntity")
                .iid(format!("0x{i:04x}"))
                .has_value("age", 20 + i64::try_from(i).unwrap_or(0)),
        );
    }
    statements.push(relation);
    and(statements)
}

fn bench_single_operators(c: &mut Criterion) {
    let ctx = schema();
    let src = star(6);
    let mut group = c.benchmark_group("operators/single");

    for op in Operators::all() {
        let outputs = op.apply(&src, &ctx).map(Iterator::count).unwrap_or(0);
        group.throughput(Throughput::Elements(outputs as u64));
        group.bench_function(op.kind().as_str(), |b| {
            b.iter(|| {
                let n = op.apply(black_box(&src), &ctx).map(Iterator::count).unwrap_or(0);
                black_box(n)
            });
        });
    }

    group.finish();
}

fn bench_lazy_prefix(c: &mut Criterion) {
    let ctx = schema();
    let mut group = c.benchmark_group("operators/first_100");

    for players in [4usize, 8, 12] {
        let src = star(players);
        group.bench_with_input(BenchmarkId::new("remove_substitution", players), &src, |b, src| {
            b.iter(|| {
                let op = Operators::remove_substitution();
                let n = op.apply(black_box(src), &ctx).map(|it| it.take(100).count()).unwrap_or(0);
                black_box(n)
            });
        });
    }

    group.finish();
}

fn bench_drivers(c: &mut Criterion) {
    let ctx = schema();
    let src = star(6);
    let ops = Operators::generalising();
    let config = DriverConfig::default();
    let mut group = c.benchmark_group("operators/drivers");

    group.bench_function("apply_chain", |b| {
        b.iter(|| black_box(apply_chain(&ops, black_box(&src), &ctx).map(|s| s.len())));
    });
    group.bench_function("apply_parallel", |b| {
        b.iter(|| black_box(apply_parallel(&ops, black_box(&src), &ctx, &config).map(|s| s.len())));
    });

    group.finish();
}

criterion_group!(operators, bench_single_operators, bench_lazy_prefix, bench_drivers);
criterion_main!(operators);
