//! The four pruning strategies applied to phase 1's raw edge set.
//!
//! Each strategy takes the same [`PruningContext`] (the growth simulator's
//! output plus the original graph) and returns a [`PrunedResult`] of raw,
//! not-yet-sorted node and edge indices; `solve.rs` sorts and deduplicates
//! the final answer.

mod gw;
mod none;
mod simple;
mod strong;
mod utils;

use crate::cluster::{Cluster, EdgeInfo, InactiveMergeEvent};
use crate::logging::LogSink;
use crate::types::{EdgeId, NodeId, PruningMethod};

pub(crate) struct PruningContext<'a> {
    pub edges: &'a [(NodeId, NodeId)],
    pub costs: &'a [f64],
    pub prizes: &'a [f64],
    pub root: Option<NodeId>,
    pub phase1_edges: &'a [EdgeId],
    pub node_good: &'a [bool],
    pub edge_info: &'a [EdgeInfo],
    pub inactive_merge_events: &'a [InactiveMergeEvent],
    pub clusters: Vec<Cluster>,
    pub sink: &'a dyn LogSink,
}

pub(crate) struct PrunedResult {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

pub(crate) fn prune(method: PruningMethod, ctx: PruningContext<'_>) -> PrunedResult {
    match method {
        PruningMethod::None => none::prune(&ctx),
        PruningMethod::Simple => simple::prune(&ctx),
        PruningMethod::Gw => gw::prune(ctx),
        PruningMethod::Strong => strong::prune(ctx),
    }
}
