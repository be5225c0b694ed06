//! Post-solve invariant checkers for correctness validation.

use std::collections::HashSet;

use pcst_core::Solution;

/// Verifies that the solution's node and edge index lists are each
/// strictly ascending (sorted and deduplicated), as `solve` promises.
pub fn check_output_is_sorted_and_deduped(solution: &Solution) -> Result<(), String> {
    let mut sorted_nodes = solution.nodes.clone();
    sorted_nodes.sort_unstable();
    sorted_nodes.dedup();
    if sorted_nodes != solution.nodes {
        return Err("node list is not strictly ascending".to_owned());
    }
    let mut sorted_edges = solution.edges.clone();
    sorted_edges.sort_unstable();
    sorted_edges.dedup();
    if sorted_edges != solution.edges {
        return Err("edge list is not strictly ascending".to_owned());
    }
    Ok(())
}

/// Verifies that every edge in the solution has both endpoints present in
/// the solution's node set.
pub fn check_edges_span_solution_nodes(
    solution: &Solution,
    edges: &[(usize, usize)],
) -> Result<(), String> {
    let node_set: HashSet<usize> = solution.nodes.iter().copied().collect();
    for &edge_idx in &solution.edges {
        let (u, v) = edges[edge_idx];
        if !node_set.contains(&u) {
            return Err(format!("edge {edge_idx} endpoint {u} not in solution nodes"));
        }
        if !node_set.contains(&v) {
            return Err(format!("edge {edge_idx} endpoint {v} not in solution nodes"));
        }
    }
    Ok(())
}

/// Verifies that the solution's edge set, restricted to its node set, forms
/// a forest (no cycles): a connected graph is a forest iff it has at most
/// `nodes - components` edges, which for a union-find walk means no edge
/// ever joins two nodes already in the same component.
pub fn check_solution_is_acyclic(solution: &Solution, edges: &[(usize, usize)]) -> Result<(), String> {
    let mut parent: std::collections::HashMap<usize, usize> =
        solution.nodes.iter().map(|&n| (n, n)).collect();

    fn find(parent: &mut std::collections::HashMap<usize, usize>, x: usize) -> usize {
        let p = *parent.entry(x).or_insert(x);
        if p == x {
            x
        } else {
            let root = find(parent, p);
            parent.insert(x, root);
            root
        }
    }

    for &edge_idx in &solution.edges {
        let (u, v) = edges[edge_idx];
        let ru = find(&mut parent, u);
        let rv = find(&mut parent, v);
        if ru == rv {
            return Err(format!("edge {edge_idx} ({u}, {v}) closes a cycle"));
        }
        parent.insert(ru, rv);
    }
    Ok(())
}

/// Verifies that a rooted solve's output always contains the root node.
pub fn check_rooted_solution_contains_root(solution: &Solution, root: usize) -> Result<(), String> {
    if !solution.nodes.contains(&root) {
        return Err(format!("rooted solution dropped the root node {root}"));
    }
    Ok(())
}

/// Verifies that `restricted`'s nodes and edges are each a subset of
/// `baseline`'s, as holds between `simple` and `none` pruning on the same
/// instance.
pub fn check_is_subset_of(restricted: &Solution, baseline: &Solution) -> Result<(), String> {
    let baseline_nodes: HashSet<usize> = baseline.nodes.iter().copied().collect();
    let baseline_edges: HashSet<usize> = baseline.edges.iter().copied().collect();
    for node in &restricted.nodes {
        if !baseline_nodes.contains(node) {
            return Err(format!("node {node} present in restricted but not baseline"));
        }
    }
    for edge in &restricted.edges {
        if !baseline_edges.contains(edge) {
            return Err(format!("edge {edge} present in restricted but not baseline"));
        }
    }
    Ok(())
}
