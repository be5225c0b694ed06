//! Bench the growth phase (via `PruningMethod::None`, the cheapest pruning
//! pass) across rooted and unrooted instances of increasing size.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pcst_bench::{GeneratedInstance, SizeTier, generate_instance};
use pcst_core::{PruningMethod, SolveInput, solve};

fn solve_input(instance: &GeneratedInstance, root: Option<usize>, num_clusters: usize) -> SolveInput<'_> {
    SolveInput {
        prizes: &instance.prizes,
        edges: &instance.edges,
        costs: &instance.costs,
        root,
        num_clusters,
    }
}

fn bench_rooted_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_rooted");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let instance = generate_instance(&tier.config(42));
        let input = solve_input(&instance, Some(0), 0);

        group.bench_function(BenchmarkId::new("none", name), |b| {
            b.iter(|| {
                let _ = solve(&input, PruningMethod::None).expect("solve succeeds");
            });
        });
    }
    group.finish();
}

fn bench_unrooted_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_unrooted");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let instance = generate_instance(&tier.config(42));
        let num_clusters = (instance.prizes.len() / 10).max(1);
        let input = solve_input(&instance, None, num_clusters);

        group.bench_function(BenchmarkId::new("none", name), |b| {
            b.iter(|| {
                let _ = solve(&input, PruningMethod::None).expect("solve succeeds");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rooted_growth, bench_unrooted_growth);
criterion_main!(benches);
