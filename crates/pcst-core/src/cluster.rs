//! Cluster, edge-part, and merge-event records.
//!
//! The merge forest is an append-only `Vec<Cluster>`: the first `num_nodes`
//! entries are the singleton clusters the simulation starts from (entry `i`
//! corresponds to node `i`), and every later entry is created by
//! [`crate::growth::GrowthSimulator::merge_clusters`]. Parent links
//! (`merged_into`, `child_1`, `child_2`) are plain `Option<ClusterId>`
//! indices into that same `Vec`, never owning pointers — the forest only
//! ever grows, so indices are stable for the life of a `solve` call.

use crate::pairing_heap::HeapHandle;
use crate::types::{ClusterId, EdgeId, EdgePartId, NodeId};

/// One endpoint-side of an edge, tracking the moat sum already paid down
/// on that side and whether it has been fully covered.
#[derive(Debug, Clone)]
pub struct EdgePart {
    /// The value this part's heap entry was last inserted/updated at; kept
    /// so a later `decrease_key` can reconstruct its prior effective key.
    pub next_event_val: f64,
    /// Set once the part (or its sibling part, via the same-edge
    /// same-cluster case) has been resolved and should no longer trigger
    /// events.
    pub deleted: bool,
    /// Handle into the owning cluster's pairing heap, if this part has an
    /// outstanding event.
    pub heap_node: Option<HeapHandle>,
}

impl Default for EdgePart {
    fn default() -> Self {
        Self {
            next_event_val: f64::INFINITY,
            deleted: false,
            heap_node: None,
        }
    }
}

/// Per-edge bookkeeping independent of its two parts.
#[derive(Debug, Clone, Default)]
pub struct EdgeInfo {
    /// Index into the growth simulator's `inactive_merge_events` list, set
    /// when this edge's coverage triggered a merge with an inactive side.
    pub inactive_merge_event: Option<usize>,
}

/// Records which side of a merge-triggering edge was inactive at the
/// moment of the merge, and which original node each side's growth reached
/// from — the facts the GW pruner needs to decide necessity without
/// re-walking the whole simulation.
#[derive(Debug, Clone, Copy)]
pub struct InactiveMergeEvent {
    /// The merging cluster that was active (or, for an active-active
    /// merge that happens to have one side already at a `prize_sum` of
    /// zero, whichever side the growth loop designates active).
    pub active_cluster_index: ClusterId,
    /// The merging cluster that was inactive at the time of the merge.
    pub inactive_cluster_index: ClusterId,
    pub active_cluster_node: NodeId,
    pub inactive_cluster_node: NodeId,
}

/// A node in the merge forest: either one of the original singleton
/// clusters or the result of merging two earlier clusters along an edge.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Root of this cluster's pairing heap of incident, unresolved edge
    /// parts. `None` means the heap is empty.
    pub edge_parts_root: Option<HeapHandle>,
    pub active: bool,
    pub active_start: f64,
    /// `None` until the cluster deactivates (or, for the root's singleton
    /// cluster, `Some(0.0)` from the start).
    pub active_end: Option<f64>,
    pub prize_sum: f64,
    /// Sum of `moat` over every cluster merged into this one, direct or
    /// transitive, excluding this cluster's own (not yet known) moat.
    pub subcluster_moat_sum: f64,
    /// This cluster's own moat width, fixed once it deactivates.
    pub moat: f64,
    pub contains_root: bool,

    pub merged_into: Option<ClusterId>,
    pub merged_along: Option<EdgeId>,
    pub child_1: Option<ClusterId>,
    pub child_2: Option<ClusterId>,

    /// Path-compression cache for `get_sum_on_edge_part`: the last
    /// ancestor this cluster's sum was measured against, and the sum
    /// accumulated up to that ancestor.
    pub skip_up: Option<ClusterId>,
    pub skip_up_sum: f64,

    /// Set by GW pruning's reverse necessity walk.
    pub necessary: bool,
}

impl Cluster {
    /// A singleton cluster for one of the original nodes, active unless it
    /// is the designated root. The cluster's own index in the arena is
    /// the node's index; there is no separate node field to set.
    pub(crate) fn singleton(prize: f64, is_root: bool) -> Self {
        Self {
            edge_parts_root: None,
            active: !is_root,
            active_start: 0.0,
            active_end: if is_root { Some(0.0) } else { None },
            prize_sum: prize,
            subcluster_moat_sum: 0.0,
            moat: 0.0,
            contains_root: is_root,
            merged_into: None,
            merged_along: None,
            child_1: None,
            child_2: None,
            skip_up: None,
            skip_up_sum: 0.0,
            necessary: false,
        }
    }
}
