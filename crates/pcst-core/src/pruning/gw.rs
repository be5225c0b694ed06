//! Goemans-Williamson pruning: walk the Simple-filtered edges from the
//! last-grown to the first, keeping an edge whenever the merge it caused
//! is still needed to connect something necessary, and deleting the
//! inactive side's whole subtree otherwise.

use super::utils::{
    build_adjacency_list, build_final_node_set, mark_clusters_as_necessary_from_node,
    mark_nodes_as_deleted, simple_filter,
};
use super::{PruningContext, PrunedResult};
use crate::logging::LogLevel;
use crate::types::EdgeId;

pub(super) fn prune(ctx: PruningContext<'_>) -> PrunedResult {
    let intermediate_edges = simple_filter(ctx.phase1_edges, ctx.edges, ctx.node_good);
    if intermediate_edges.is_empty() {
        let node_deleted = vec![false; ctx.node_good.len()];
        let nodes = build_final_node_set(ctx.node_good.len(), &node_deleted, ctx.node_good);
        return PrunedResult { nodes, edges: Vec::new() };
    }

    let num_nodes = ctx.node_good.len();
    let adjacency = build_adjacency_list(num_nodes, ctx.edges, ctx.costs, &intermediate_edges);
    let mut clusters = ctx.clusters;
    let mut node_deleted = vec![false; num_nodes];
    let mut queue = Vec::new();
    let mut kept_reversed: Vec<EdgeId> = Vec::with_capacity(intermediate_edges.len());

    for &edge in intermediate_edges.iter().rev() {
        let (u, v) = ctx.edges[edge.index()];
        if node_deleted[u.index()] && node_deleted[v.index()] {
            continue;
        }

        match ctx.edge_info[edge.index()].inactive_merge_event {
            None => {
                kept_reversed.push(edge);
                mark_clusters_as_necessary_from_node(&mut clusters, u);
                mark_clusters_as_necessary_from_node(&mut clusters, v);
            }
            Some(event_idx) => {
                let event = ctx.inactive_merge_events[event_idx];
                let inactive_is_necessary = clusters[event.inactive_cluster_index.index()].necessary;
                let inactive_is_root = ctx.root == Some(event.inactive_cluster_node);

                if inactive_is_necessary || inactive_is_root {
                    kept_reversed.push(edge);
                    mark_clusters_as_necessary_from_node(&mut clusters, event.active_cluster_node);
                    mark_clusters_as_necessary_from_node(&mut clusters, event.inactive_cluster_node);
                } else {
                    mark_nodes_as_deleted(
                        &adjacency,
                        &mut node_deleted,
                        event.inactive_cluster_node,
                        event.active_cluster_node,
                        false,
                        &mut queue,
                    );
                }
            }
        }
    }

    if ctx.sink.enabled(LogLevel::Debug) {
        ctx.sink.log(
            LogLevel::Debug,
            &format!(
                "gw pruning: kept {} of {} simple-filtered edges",
                kept_reversed.len(),
                intermediate_edges.len()
            ),
        );
    }

    kept_reversed.reverse();
    let nodes = build_final_node_set(num_nodes, &node_deleted, ctx.node_good);
    PrunedResult {
        nodes,
        edges: kept_reversed,
    }
}
