//! Strong pruning: find each surviving connected component's best root by
//! a re-rooted payoff DP, then delete any subtree whose own prize doesn't
//! cover the cost of the edge connecting it to its parent.
//!
//! Every component is processed independently; the component containing
//! the designated root (for the rooted variant) is always rooted there,
//! never re-rooted, since the root is fixed by definition.

use super::utils::{
    build_adjacency_list, build_final_node_set, mark_nodes_as_deleted, simple_filter,
};
use super::{PruningContext, PrunedResult};
use crate::types::{EdgeId, NodeId};

const EPS: f64 = 1e-9;

pub(super) fn prune(ctx: PruningContext<'_>) -> PrunedResult {
    let intermediate_edges = simple_filter(ctx.phase1_edges, ctx.edges, ctx.node_good);
    if intermediate_edges.is_empty() {
        let node_deleted = vec![false; ctx.node_good.len()];
        let nodes = build_final_node_set(ctx.node_good.len(), &node_deleted, ctx.node_good);
        return PrunedResult { nodes, edges: Vec::new() };
    }

    let num_nodes = ctx.node_good.len();
    let adjacency = build_adjacency_list(num_nodes, ctx.edges, ctx.costs, &intermediate_edges);

    let mut component_of = vec![None; num_nodes];
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut root_component = None;
    let mut stack = Vec::new();

    for i in 0..num_nodes {
        if component_of[i].is_some() || (adjacency[i].is_empty() && !ctx.node_good[i]) {
            continue;
        }
        let component_idx = components.len();
        let mut members = Vec::new();
        stack.clear();
        stack.push(NodeId::from(i));
        component_of[i] = Some(component_idx);
        while let Some(node) = stack.pop() {
            members.push(node);
            if ctx.root == Some(node) {
                root_component = Some(component_idx);
            }
            for &(neighbor, _, _) in &adjacency[node.index()] {
                if component_of[neighbor.index()].is_none() {
                    component_of[neighbor.index()] = Some(component_idx);
                    stack.push(neighbor);
                }
            }
        }
        components.push(members);
    }

    let mut node_deleted = vec![false; num_nodes];
    let mut payoff = vec![0.0; num_nodes];
    let mut parent = vec![None; num_nodes];
    let mut bfs_queue = Vec::new();

    for (idx, members) in components.iter().enumerate() {
        let start = if Some(idx) == root_component {
            ctx.root.unwrap_or(members[0])
        } else {
            find_best_component_root(
                members,
                &adjacency,
                ctx.prizes,
                &mut payoff,
                &mut parent,
            )
        };
        for &node in members {
            payoff[node.index()] = 0.0;
            parent[node.index()] = None;
        }
        strong_pruning_dfs(
            start,
            &adjacency,
            ctx.prizes,
            &mut payoff,
            &mut parent,
            &mut node_deleted,
            &mut bfs_queue,
        );
    }

    let edges: Vec<EdgeId> = intermediate_edges
        .into_iter()
        .filter(|&e| {
            let (u, v) = ctx.edges[e.index()];
            !node_deleted[u.index()] && !node_deleted[v.index()]
        })
        .collect();
    let nodes = build_final_node_set(num_nodes, &node_deleted, ctx.node_good);
    PrunedResult { nodes, edges }
}

/// Post-order DFS computing each node's payoff as its own prize plus the
/// net contribution of every child whose subtree earns more than the cost
/// of the edge connecting it; deletes subtrees that don't clear that bar.
fn strong_pruning_dfs(
    start: NodeId,
    adjacency: &[Vec<(NodeId, f64, EdgeId)>],
    prizes: &[f64],
    payoff: &mut [f64],
    parent: &mut [Option<NodeId>],
    node_deleted: &mut [bool],
    bfs_queue: &mut Vec<NodeId>,
) {
    let mut stack: Vec<(bool, NodeId)> = vec![(true, start)];
    parent[start.index()] = None;

    while let Some((is_entry, node)) = stack.pop() {
        if is_entry {
            stack.push((false, node));
            for &(neighbor, _, _) in &adjacency[node.index()] {
                if Some(neighbor) != parent[node.index()] {
                    parent[neighbor.index()] = Some(node);
                    stack.push((true, neighbor));
                }
            }
        } else {
            payoff[node.index()] = prizes[node.index()];
            for &(neighbor, cost, _) in &adjacency[node.index()] {
                if parent[neighbor.index()] != Some(node) {
                    continue;
                }
                let child_net = payoff[neighbor.index()] - cost;
                if child_net <= EPS {
                    mark_nodes_as_deleted(adjacency, node_deleted, neighbor, node, true, bfs_queue);
                } else {
                    payoff[node.index()] += child_net;
                }
            }
        }
    }
}

/// Probes from an arbitrary component member, then walks the tree
/// re-rooting towards whichever node maximizes total payoff, without
/// deleting anything. Returns the best root found.
fn find_best_component_root(
    members: &[NodeId],
    adjacency: &[Vec<(NodeId, f64, EdgeId)>],
    prizes: &[f64],
    payoff: &mut [f64],
    parent: &mut [Option<NodeId>],
) -> NodeId {
    let initial_root = members[0];
    let mut scratch_deleted = vec![false; prizes.len()];
    let mut scratch_queue = Vec::new();
    for &node in members {
        payoff[node.index()] = 0.0;
        parent[node.index()] = None;
    }
    strong_pruning_dfs(
        initial_root,
        adjacency,
        prizes,
        payoff,
        parent,
        &mut scratch_deleted,
        &mut scratch_queue,
    );

    let mut best_root = initial_root;
    let mut best_payoff = payoff[initial_root.index()];

    let mut rerooted = payoff.to_vec();
    let mut walk = Vec::new();
    for &(neighbor, _, _) in &adjacency[initial_root.index()] {
        walk.push(neighbor);
    }

    while let Some(current) = walk.pop() {
        let Some(parent_node) = parent[current.index()] else {
            continue;
        };
        let edge_cost = adjacency[current.index()]
            .iter()
            .find(|&&(n, _, _)| n == parent_node)
            .map_or(0.0, |&(_, c, _)| c);

        let current_contribution_to_parent = (rerooted[current.index()] - edge_cost).max(0.0);
        let parent_val_without_current = (rerooted[parent_node.index()] - current_contribution_to_parent).max(0.0);

        if parent_val_without_current > edge_cost + EPS {
            rerooted[current.index()] += parent_val_without_current - edge_cost;
        }

        if rerooted[current.index()] > best_payoff {
            best_payoff = rerooted[current.index()];
            best_root = current;
        }

        for &(neighbor, _, _) in &adjacency[current.index()] {
            if Some(neighbor) != parent[current.index()] {
                walk.push(neighbor);
            }
        }
    }

    best_root
}
