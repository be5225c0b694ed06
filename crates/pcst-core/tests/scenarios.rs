//! Concrete scenarios (S1-S6) and round-trip laws from `spec.md` §8,
//! exercised purely through the public `solve` entry point.
#![allow(clippy::expect_used)]

use pcst_core::{PruningMethod, SolveInput, solve};

fn input<'a>(
    prizes: &'a [f64],
    edges: &'a [(usize, usize)],
    costs: &'a [f64],
    root: Option<usize>,
    num_clusters: usize,
) -> SolveInput<'a> {
    SolveInput {
        prizes,
        edges,
        costs,
        root,
        num_clusters,
    }
}

/// S1: rooted three-node path, no pruning keeps everything growth reached.
#[test]
fn s1_rooted_path_no_pruning() {
    let prizes = vec![0.0, 5.0, 6.0];
    let edges = vec![(0, 1), (1, 2)];
    let costs = vec![3.0, 4.0];
    let solution = solve(&input(&prizes, &edges, &costs, Some(0), 0), PruningMethod::None)
        .expect("S1 should solve");
    assert_eq!(solution.nodes, vec![0, 1, 2]);
    assert_eq!(solution.edges, vec![0, 1]);
}

/// S2: same graph, unrooted with one target forest, GW pruning drops the
/// zero-prize node that only the root side needed.
#[test]
fn s2_unrooted_gw_drops_unrooted_low_value_node() {
    let prizes = vec![0.0, 5.0, 6.0];
    let edges = vec![(0, 1), (1, 2)];
    let costs = vec![3.0, 4.0];
    let solution = solve(&input(&prizes, &edges, &costs, None, 1), PruningMethod::Gw)
        .expect("S2 should solve");
    assert_eq!(solution.nodes, vec![1, 2]);
    assert_eq!(solution.edges, vec![1]);
}

/// S3: the far cluster of a four-node path is too costly to reach; GW
/// pruning leaves only the root.
#[test]
fn s3_rooted_gw_prunes_unreachable_far_cluster() {
    let prizes = vec![10.0, 0.0, 1.0, 10.0];
    let edges = vec![(0, 1), (1, 2), (2, 3)];
    let costs = vec![10.0, 4.0, 3.0];
    let solution = solve(&input(&prizes, &edges, &costs, Some(0), 0), PruningMethod::Gw)
        .expect("S3 should solve");
    assert_eq!(solution.nodes, vec![0]);
    assert!(solution.edges.is_empty());
}

/// S4: every cluster on the same path is worth keeping once prizes rise.
#[test]
fn s4_rooted_gw_keeps_every_necessary_cluster() {
    let prizes = vec![10.0, 10.0, 1.0, 10.0];
    let edges = vec![(0, 1), (1, 2), (2, 3)];
    let costs = vec![10.0, 6.0, 5.0];
    let solution = solve(&input(&prizes, &edges, &costs, Some(0), 0), PruningMethod::Gw)
        .expect("S4 should solve");
    assert_eq!(solution.nodes, vec![0, 1, 2, 3]);
    assert_eq!(solution.edges, vec![0, 1, 2]);
}

/// S5: strong pruning rejects a path whose tail isn't worth its cost.
#[test]
fn s5_unrooted_strong_prunes_net_negative_path() {
    let prizes = vec![0.0, 2.2, 0.0, 0.0, 2.1];
    let edges = vec![(0, 1), (0, 2), (2, 3), (3, 4)];
    let costs = vec![1.0, 1.0, 1.0, 1.0];
    let solution = solve(&input(&prizes, &edges, &costs, None, 1), PruningMethod::Strong)
        .expect("S5 should solve");
    assert_eq!(solution.nodes, vec![1]);
    assert!(solution.edges.is_empty());
}

/// S6: strong pruning keeps a zero-cost edge and drops an expensive one.
#[test]
fn s6_unrooted_strong_keeps_zero_cost_edge() {
    let prizes = vec![2.0, 2.0, 2.0];
    let edges = vec![(0, 1), (1, 2)];
    let costs = vec![0.0, 5.0];
    let solution = solve(&input(&prizes, &edges, &costs, None, 1), PruningMethod::Strong)
        .expect("S6 should solve");
    assert_eq!(solution.nodes, vec![0, 1]);
    assert_eq!(solution.edges, vec![0]);
}

/// Round-trip law: `simple` never returns more nodes or edges than `none`
/// on the same instance.
#[test]
fn simple_is_a_subset_restriction_of_none() {
    let prizes = vec![10.0, 10.0, 1.0, 10.0];
    let edges = vec![(0, 1), (1, 2), (2, 3)];
    let costs = vec![10.0, 6.0, 5.0];

    let none = solve(&input(&prizes, &edges, &costs, Some(0), 0), PruningMethod::None)
        .expect("none should solve");
    let simple = solve(&input(&prizes, &edges, &costs, Some(0), 0), PruningMethod::Simple)
        .expect("simple should solve");

    for node in &simple.nodes {
        assert!(none.nodes.contains(node));
    }
    for edge in &simple.edges {
        assert!(none.edges.contains(edge));
    }
}

/// Round-trip law: strong pruning is idempotent when fed back its own
/// output edges as a synthetic instance with the same prizes/costs.
#[test]
fn strong_pruning_is_idempotent() {
    let prizes = vec![0.0, 2.2, 0.0, 0.0, 2.1];
    let edges = vec![(0, 1), (0, 2), (2, 3), (3, 4)];
    let costs = vec![1.0, 1.0, 1.0, 1.0];

    let first = solve(&input(&prizes, &edges, &costs, None, 1), PruningMethod::Strong)
        .expect("first strong pass should solve");

    // Re-run strong pruning restricted to the surviving edges; feeding the
    // same costs/prizes back with `none` of the pruned structure removed
    // must reproduce exactly the same node/edge set.
    let second_edges: Vec<(usize, usize)> = first.edges.iter().map(|&e| edges[e]).collect();
    let second_costs: Vec<f64> = first.edges.iter().map(|&e| costs[e]).collect();
    let second = solve(
        &input(&prizes, &second_edges, &second_costs, None, 1),
        PruningMethod::Strong,
    )
    .expect("second strong pass should solve");

    let mut first_nodes = first.nodes.clone();
    first_nodes.sort_unstable();
    let mut second_nodes = second.nodes.clone();
    second_nodes.sort_unstable();
    assert_eq!(first_nodes, second_nodes);
    assert_eq!(second.edges.len(), first.edges.len());
}

/// Output sortedness holds regardless of pruning method.
#[test]
fn output_lists_are_always_strictly_ascending() {
    let prizes = vec![3.0, 1.0, 4.0, 1.0, 5.0];
    let edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)];
    let costs = vec![1.0, 1.0, 1.0, 1.0, 1.0];

    for method in [
        PruningMethod::None,
        PruningMethod::Simple,
        PruningMethod::Gw,
        PruningMethod::Strong,
    ] {
        let solution =
            solve(&input(&prizes, &edges, &costs, None, 2), method).expect("should solve");
        let mut sorted_nodes = solution.nodes.clone();
        sorted_nodes.dedup();
        sorted_nodes.sort_unstable();
        assert_eq!(solution.nodes, sorted_nodes);

        let mut sorted_edges = solution.edges.clone();
        sorted_edges.dedup();
        sorted_edges.sort_unstable();
        assert_eq!(solution.edges, sorted_edges);
    }
}

/// Rooted output always contains the root when the root's own prize alone
/// justifies keeping it (the degenerate all-pruned case still keeps it).
#[test]
fn rooted_output_always_contains_the_root() {
    let prizes = vec![10.0, 0.0, 1.0, 10.0];
    let edges = vec![(0, 1), (1, 2), (2, 3)];
    let costs = vec![10.0, 4.0, 3.0];

    for method in [
        PruningMethod::None,
        PruningMethod::Simple,
        PruningMethod::Gw,
        PruningMethod::Strong,
    ] {
        let solution =
            solve(&input(&prizes, &edges, &costs, Some(0), 0), method).expect("should solve");
        assert!(solution.nodes.contains(&0), "method {method:?} dropped the root");
    }
}
