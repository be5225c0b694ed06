//! The no-op pruner: phase-1 edges are returned verbatim, unfiltered by
//! node goodness, plus every good node that wasn't already an endpoint.

use super::{PruningContext, PrunedResult};
use crate::types::NodeId;

pub(super) fn prune(ctx: &PruningContext<'_>) -> PrunedResult {
    let edges = ctx.phase1_edges.to_vec();

    let mut included = vec![false; ctx.node_good.len()];
    let mut nodes = Vec::new();
    for &edge in &edges {
        let (u, v) = ctx.edges[edge.index()];
        if !included[u.index()] {
            included[u.index()] = true;
            nodes.push(u);
        }
        if !included[v.index()] {
            included[v.index()] = true;
            nodes.push(v);
        }
    }
    for (i, &good) in ctx.node_good.iter().enumerate() {
        if good && !included[i] {
            nodes.push(NodeId::from(i));
        }
    }

    PrunedResult { nodes, edges }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::logging::NullSink;
    use crate::types::EdgeId;

    #[test]
    fn keeps_every_phase1_edge_regardless_of_node_goodness() {
        let sink = NullSink;
        let edges = vec![(NodeId::from(0), NodeId::from(1))];
        let costs = vec![1.0];
        let prizes = vec![1.0, 1.0];
        let ctx = PruningContext {
            edges: &edges,
            costs: &costs,
            prizes: &prizes,
            root: None,
            phase1_edges: &[EdgeId::from(0)],
            node_good: &[true, false],
            edge_info: &[],
            inactive_merge_events: &[],
            clusters: Vec::new(),
            sink: &sink,
        };
        let result = prune(&ctx);
        assert_eq!(result.edges, vec![EdgeId::from(0)]);
        assert!(result.nodes.contains(&NodeId::from(0)));
        assert!(result.nodes.contains(&NodeId::from(1)));
    }

    #[test]
    fn appends_good_nodes_with_no_surviving_edge() {
        let sink = NullSink;
        let edges: Vec<(NodeId, NodeId)> = Vec::new();
        let costs: Vec<f64> = Vec::new();
        let prizes = vec![1.0, 1.0, 1.0];
        let ctx = PruningContext {
            edges: &edges,
            costs: &costs,
            prizes: &prizes,
            root: None,
            phase1_edges: &[],
            node_good: &[true, false, true],
            edge_info: &[],
            inactive_merge_events: &[],
            clusters: Vec::new(),
            sink: &sink,
        };
        let result = prune(&ctx);
        assert_eq!(result.nodes, vec![NodeId::from(0), NodeId::from(2)]);
    }
}
