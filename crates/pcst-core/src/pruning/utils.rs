//! Helpers shared by two or more pruning strategies.

use crate::cluster::Cluster;
use crate::types::{ClusterId, EdgeId, NodeId};

/// Nodes in ascending order that are initially good and not later deleted.
pub(super) fn build_final_node_set(
    num_nodes: usize,
    node_deleted: &[bool],
    node_good: &[bool],
) -> Vec<NodeId> {
    (0..num_nodes)
        .filter(|&i| node_good[i] && !node_deleted[i])
        .map(NodeId::from)
        .collect()
}

/// Undirected adjacency list over `edges`, sized to cover every node index
/// mentioned either in `edges` or in `node_good`.
pub(super) fn build_adjacency_list(
    num_nodes: usize,
    edges: &[(NodeId, NodeId)],
    costs: &[f64],
    edge_ids: &[EdgeId],
) -> Vec<Vec<(NodeId, f64, EdgeId)>> {
    let mut adjacency = vec![Vec::new(); num_nodes];
    for &edge_id in edge_ids {
        let (u, v) = edges[edge_id.index()];
        let cost = costs[edge_id.index()];
        adjacency[u.index()].push((v, cost, edge_id));
        adjacency[v.index()].push((u, cost, edge_id));
    }
    adjacency
}

/// Both-endpoints-good filter applied to the growth simulator's phase-1
/// edges, shared by the Simple, GW, and Strong pruners.
pub(super) fn simple_filter(
    phase1_edges: &[EdgeId],
    edges: &[(NodeId, NodeId)],
    node_good: &[bool],
) -> Vec<EdgeId> {
    phase1_edges
        .iter()
        .copied()
        .filter(|&e| {
            let (u, v) = edges[e.index()];
            node_good[u.index()] && node_good[v.index()]
        })
        .collect()
}

/// Walks a cluster's merge-forest ancestry from `node`'s singleton cluster
/// upward, setting `necessary` until reaching an already-necessary cluster
/// or one with no parent. Grounded on GW pruning's
/// `mark_clusters_as_necessary_from_node`.
pub(super) fn mark_clusters_as_necessary_from_node(clusters: &mut [Cluster], node: NodeId) {
    let mut current = ClusterId::from(node.index());
    loop {
        if clusters[current.index()].necessary {
            return;
        }
        clusters[current.index()].necessary = true;
        match clusters[current.index()].merged_into {
            Some(parent) => current = parent,
            None => return,
        }
    }
}

/// BFS deletion over the adjacency list, starting from `start`. `parent` is
/// excluded from the very first node's neighbor scan; `reset_parent_after_first`
/// controls whether it stays excluded for every subsequent node (GW pruning)
/// or is cleared back to "no exclusion" after the first node is processed
/// (Strong pruning) — the two reference implementations differ here, though
/// the distinction rarely changes the outcome since deleted marks already
/// prevent revisiting `parent` either way.
pub(super) fn mark_nodes_as_deleted(
    adjacency: &[Vec<(NodeId, f64, EdgeId)>],
    node_deleted: &mut [bool],
    start: NodeId,
    parent: NodeId,
    reset_parent_after_first: bool,
    queue: &mut Vec<NodeId>,
) {
    queue.clear();
    node_deleted[start.index()] = true;
    queue.push(start);
    let mut head = 0;
    let mut exclude = Some(parent);
    let mut first = true;
    while head < queue.len() {
        let current = queue[head];
        head += 1;
        for &(neighbor, _, _) in &adjacency[current.index()] {
            if Some(neighbor) == exclude && first {
                continue;
            }
            if node_deleted[neighbor.index()] {
                continue;
            }
            node_deleted[neighbor.index()] = true;
            queue.push(neighbor);
        }
        if first {
            first = false;
            if reset_parent_after_first {
                exclude = None;
            }
        }
    }
}
