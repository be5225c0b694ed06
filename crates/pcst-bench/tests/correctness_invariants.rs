//! Post-solve invariant tests against generated, randomized instances.
#![allow(clippy::expect_used)]

use pcst_bench::{SizeTier, correctness, generate_instance};
use pcst_core::{PruningMethod, SolveInput, solve};

#[test]
fn rooted_solution_is_acyclic_and_contains_root() {
    let instance = generate_instance(&SizeTier::Medium.config(1));
    let input = SolveInput {
        prizes: &instance.prizes,
        edges: &instance.edges,
        costs: &instance.costs,
        root: Some(0),
        num_clusters: 0,
    };

    for method in [
        PruningMethod::None,
        PruningMethod::Simple,
        PruningMethod::Gw,
        PruningMethod::Strong,
    ] {
        let solution = solve(&input, method).expect("solve succeeds");
        correctness::check_output_is_sorted_and_deduped(&solution).expect("sorted and deduped");
        correctness::check_edges_span_solution_nodes(&solution, &instance.edges)
            .expect("edges span solution nodes");
        correctness::check_solution_is_acyclic(&solution, &instance.edges).expect("acyclic");
        correctness::check_rooted_solution_contains_root(&solution, 0).expect("contains root");
    }
}

#[test]
fn unrooted_solution_is_acyclic() {
    let instance = generate_instance(&SizeTier::Medium.config(2));
    let num_clusters = (instance.prizes.len() / 8).max(1);
    let input = SolveInput {
        prizes: &instance.prizes,
        edges: &instance.edges,
        costs: &instance.costs,
        root: None,
        num_clusters,
    };

    for method in [
        PruningMethod::None,
        PruningMethod::Simple,
        PruningMethod::Gw,
        PruningMethod::Strong,
    ] {
        let solution = solve(&input, method).expect("solve succeeds");
        correctness::check_output_is_sorted_and_deduped(&solution).expect("sorted and deduped");
        correctness::check_edges_span_solution_nodes(&solution, &instance.edges)
            .expect("edges span solution nodes");
        correctness::check_solution_is_acyclic(&solution, &instance.edges).expect("acyclic");
    }
}

#[test]
fn simple_pruning_is_a_subset_of_none_across_seeds() {
    for seed in [10, 11, 12, 13] {
        let instance = generate_instance(&SizeTier::Small.config(seed));
        let input = SolveInput {
            prizes: &instance.prizes,
            edges: &instance.edges,
            costs: &instance.costs,
            root: Some(0),
            num_clusters: 0,
        };

        let none = solve(&input, PruningMethod::None).expect("none solves");
        let simple = solve(&input, PruningMethod::Simple).expect("simple solves");
        correctness::check_is_subset_of(&simple, &none).expect("simple is a subset of none");
    }
}

#[test]
fn gw_and_strong_pruning_never_exceed_simple_on_same_instance() {
    for seed in [20, 21, 22] {
        let instance = generate_instance(&SizeTier::Small.config(seed));
        let num_clusters = (instance.prizes.len() / 8).max(1);
        let input = SolveInput {
            prizes: &instance.prizes,
            edges: &instance.edges,
            costs: &instance.costs,
            root: None,
            num_clusters,
        };

        let simple = solve(&input, PruningMethod::Simple).expect("simple solves");
        let gw = solve(&input, PruningMethod::Gw).expect("gw solves");
        let strong = solve(&input, PruningMethod::Strong).expect("strong solves");
        correctness::check_is_subset_of(&gw, &simple).expect("gw is a subset of simple");
        correctness::check_is_subset_of(&strong, &simple).expect("strong is a subset of simple");
    }
}
