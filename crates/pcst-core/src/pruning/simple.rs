//! The Simple pruner: keep phase-1 edges with both endpoints good, and
//! every good node.

use super::utils::{build_final_node_set, simple_filter};
use super::{PruningContext, PrunedResult};

pub(super) fn prune(ctx: &PruningContext<'_>) -> PrunedResult {
    let edges = simple_filter(ctx.phase1_edges, ctx.edges, ctx.node_good);
    let node_deleted = vec![false; ctx.node_good.len()];
    let nodes = build_final_node_set(ctx.node_good.len(), &node_deleted, ctx.node_good);
    PrunedResult { nodes, edges }
}
