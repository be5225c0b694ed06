//! Input validation, growth-then-pruning orchestration, and output assembly.

use crate::error::PcstError;
use crate::growth::GrowthSimulator;
use crate::logging::{LogLevel, LogSink, NullSink};
use crate::pruning::{self, PruningContext};
use crate::types::{NodeId, PruningMethod, Solution, SolveInput};

/// Runs the solver with a [`NullSink`], discarding every log message.
pub fn solve(input: &SolveInput<'_>, pruning: PruningMethod) -> Result<Solution, PcstError> {
    solve_with_logger(input, pruning, &NullSink)
}

/// Runs the solver, forwarding every log message to `logger`.
pub fn solve_with_logger(
    input: &SolveInput<'_>,
    pruning: PruningMethod,
    logger: &dyn LogSink,
) -> Result<Solution, PcstError> {
    validate(input)?;

    let root = input.root.map(NodeId::from);
    let edges: Vec<(NodeId, NodeId)> = input
        .edges
        .iter()
        .map(|&(u, v)| (NodeId::from(u), NodeId::from(v)))
        .collect();

    let simulator = GrowthSimulator::new(
        &edges,
        input.prizes,
        input.costs,
        root,
        input.num_clusters,
        logger,
    );
    let growth = simulator.run()?;

    logger_log(logger, LogLevel::Debug, || {
        format!(
            "solve: growth produced {} phase-1 edges",
            growth.phase1_edges.len()
        )
    });

    let ctx = PruningContext {
        edges: &edges,
        costs: input.costs,
        prizes: input.prizes,
        root,
        phase1_edges: &growth.phase1_edges,
        node_good: &growth.node_good,
        edge_info: &growth.edge_info,
        inactive_merge_events: &growth.inactive_merge_events,
        clusters: growth.clusters,
        sink: logger,
    };
    let pruned = pruning::prune(pruning, ctx);

    let mut nodes: Vec<usize> = pruned.nodes.iter().map(|n| n.index()).collect();
    let mut edge_indices: Vec<usize> = pruned.edges.iter().map(|e| e.index()).collect();
    nodes.sort_unstable();
    nodes.dedup();
    edge_indices.sort_unstable();
    edge_indices.dedup();

    Ok(Solution {
        nodes,
        edges: edge_indices,
    })
}

fn logger_log(logger: &dyn LogSink, level: LogLevel, message: impl FnOnce() -> String) {
    if logger.enabled(level) {
        logger.log(level, &message());
    }
}

/// Mirrors the reference constructor's validation order: rooted-with-nonzero-target,
/// negative target, empty prizes, edges/costs length mismatch, negative prize,
/// negative cost, then out-of-range endpoint.
fn validate(input: &SolveInput<'_>) -> Result<(), PcstError> {
    if input.root.is_some() && input.num_clusters != 0 {
        return Err(PcstError::InvalidArgument(
            "num_clusters must be 0 when root is set (rooted PCST grows to a single tree)".to_owned(),
        ));
    }
    if input.root.is_none() && input.num_clusters == 0 {
        return Err(PcstError::InvalidArgument(
            "num_clusters must be at least 1 for the unrooted PCSF variant".to_owned(),
        ));
    }
    if input.prizes.is_empty() {
        return Err(PcstError::InvalidArgument("prizes must not be empty".to_owned()));
    }
    if input.edges.len() != input.costs.len() {
        return Err(PcstError::InvalidArgument(format!(
            "edges has {} entries but costs has {}",
            input.edges.len(),
            input.costs.len()
        )));
    }
    for (i, &prize) in input.prizes.iter().enumerate() {
        if prize < 0.0 {
            return Err(PcstError::InvalidArgument(format!(
                "prize at node {i} is negative ({prize})"
            )));
        }
    }
    for (i, &cost) in input.costs.iter().enumerate() {
        if cost < 0.0 {
            return Err(PcstError::InvalidArgument(format!(
                "cost at edge {i} is negative ({cost})"
            )));
        }
    }
    let num_nodes = input.prizes.len();
    for (i, &(u, v)) in input.edges.iter().enumerate() {
        if u >= num_nodes || v >= num_nodes {
            return Err(PcstError::IndexOutOfRange(format!(
                "edge {i} references node index out of range [0, {num_nodes})"
            )));
        }
    }
    if let Some(root) = input.root {
        if root >= num_nodes {
            return Err(PcstError::IndexOutOfRange(format!(
                "root index {root} is out of range [0, {num_nodes})"
            )));
        }
    }
    Ok(())
}
