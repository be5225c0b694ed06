//! Phase 1: the Goemans-Williamson moat-growth event simulation.
//!
//! [`GrowthSimulator`] advances a single global clock, alternating between
//! edge-coverage events (an edge part's remaining cost reaches zero) and
//! cluster-deactivation events (an active cluster's prize is exhausted by
//! its own and its subclusters' moats), until the number of active
//! clusters reaches the caller's target. Growth never re-examines the
//! past: every cluster record, once written, is immutable except for the
//! small set of fields `merge_clusters` and `handle_cluster_event` update
//! in place (`merged_into`, `active`, `active_end`, `moat`, `skip_up`).

use crate::cluster::{Cluster, EdgeInfo, EdgePart, InactiveMergeEvent};
use crate::error::PcstError;
use crate::logging::{LogLevel, LogSink};
use crate::pairing_heap::PairingHeapArena;
use crate::indexed_pq::IndexedPriorityQueue;
use crate::types::{ClusterId, EdgeId, EdgePartId, NodeId};

/// Absolute floating-point tolerance used throughout growth: coverage
/// checks, time-delta sanity checks, and moat/time clamping. `spec.md`'s
/// Design Notes call for `ε ≈ 1e-9`; the reference implementation's
/// internal constant of `1e-6` is not carried over; see `DESIGN.md`.
pub(crate) const EPS: f64 = 1e-9;

/// Everything phase 1 hands to pruning: the raw edge set it discovered,
/// which nodes are reachable from the root (or from any surviving active
/// cluster, when unrooted), and the merge forest pruning walks over.
pub struct GrowthResult {
    pub phase1_edges: Vec<EdgeId>,
    pub node_good: Vec<bool>,
    pub edge_info: Vec<EdgeInfo>,
    pub inactive_merge_events: Vec<InactiveMergeEvent>,
    pub clusters: Vec<Cluster>,
}

pub struct GrowthSimulator<'a> {
    edges: &'a [(NodeId, NodeId)],
    prizes: &'a [f64],
    costs: &'a [f64],
    root: Option<NodeId>,
    target_active_clusters: usize,
    sink: &'a dyn LogSink,

    current_time: f64,
    num_active_clusters: usize,

    clusters: Vec<Cluster>,
    edge_parts: Vec<EdgePart>,
    edge_info: Vec<EdgeInfo>,
    inactive_merge_events: Vec<InactiveMergeEvent>,
    phase1_edges: Vec<EdgeId>,
    node_good: Vec<bool>,

    heap_arena: PairingHeapArena,
    clusters_deactivation: IndexedPriorityQueue,
    clusters_next_edge_event: IndexedPriorityQueue,

    path_compression_visited: Vec<(ClusterId, f64)>,
    bfs_queue: Vec<ClusterId>,
}

impl<'a> GrowthSimulator<'a> {
    pub fn new(
        edges: &'a [(NodeId, NodeId)],
        prizes: &'a [f64],
        costs: &'a [f64],
        root: Option<NodeId>,
        target_active_clusters: usize,
        sink: &'a dyn LogSink,
    ) -> Self {
        Self {
            edges,
            prizes,
            costs,
            root,
            target_active_clusters,
            sink,
            current_time: 0.0,
            num_active_clusters: 0,
            clusters: Vec::new(),
            edge_parts: Vec::new(),
            edge_info: Vec::new(),
            inactive_merge_events: Vec::new(),
            phase1_edges: Vec::new(),
            node_good: Vec::new(),
            heap_arena: PairingHeapArena::new(),
            clusters_deactivation: IndexedPriorityQueue::new(),
            clusters_next_edge_event: IndexedPriorityQueue::new(),
            path_compression_visited: Vec::new(),
            bfs_queue: Vec::new(),
        }
    }

    fn log(&self, level: LogLevel, message: impl FnOnce() -> String) {
        if self.sink.enabled(level) {
            self.sink.log(level, &message());
        }
    }

    fn other_edge_part(part: EdgePartId) -> EdgePartId {
        let idx = part.index();
        EdgePartId::from(if idx % 2 == 0 { idx + 1 } else { idx - 1 })
    }

    /// Runs the full event loop and returns the packaged phase-1 result.
    pub fn run(mut self) -> Result<GrowthResult, PcstError> {
        self.initialize();
        self.log(LogLevel::Debug, || {
            format!(
                "growth: starting with {} active clusters, target {}",
                self.num_active_clusters, self.target_active_clusters
            )
        });

        while self.num_active_clusters > self.target_active_clusters {
            let next_edge = self.get_next_edge_event()?;
            let next_cluster = self.get_next_cluster_event();

            let edge_time = next_edge.map_or(f64::INFINITY, |(t, _, _)| t);
            let cluster_time = next_cluster.map_or(f64::INFINITY, |(t, _)| t);

            if edge_time.is_infinite() && cluster_time.is_infinite() {
                self.log(LogLevel::Warning, || {
                    "growth: no events remain before reaching the target active-cluster count"
                        .to_owned()
                });
                break;
            }

            let next_time = edge_time.min(cluster_time);
            let time_delta = next_time - self.current_time;
            if time_delta < -EPS {
                return Err(PcstError::Internal(format!(
                    "event time {next_time} precedes current time {}",
                    self.current_time
                )));
            }

            if edge_time <= cluster_time + EPS {
                self.current_time = edge_time;
                if let Some((_, trigger_cluster, edge_part)) = next_edge {
                    self.remove_next_edge_event(trigger_cluster)?;
                    self.handle_edge_event(edge_part)?;
                }
            } else {
                self.current_time = cluster_time;
                if let Some((_, cluster_idx)) = next_cluster {
                    self.remove_next_cluster_event()?;
                    self.handle_cluster_event(cluster_idx)?;
                }
            }
        }

        self.mark_good_nodes();
        Ok(self.build_result())
    }

    fn initialize(&mut self) {
        let num_nodes = self.prizes.len();
        self.clusters.reserve(2 * num_nodes);
        for i in 0..num_nodes {
            let is_root = self.root == Some(NodeId::from(i));
            let cluster = Cluster::singleton(self.prizes[i], is_root);
            if cluster.active {
                self.num_active_clusters += 1;
                self.clusters_deactivation
                    .insert_or_update(cluster.prize_sum, ClusterId::from(i));
            }
            self.clusters.push(cluster);
        }

        self.edge_parts = vec![EdgePart::default(); 2 * self.edges.len()];
        self.edge_info = vec![EdgeInfo::default(); self.edges.len()];

        for (edge_idx, &(u, v)) in self.edges.iter().enumerate() {
            if u == v {
                self.log(LogLevel::Warning, || {
                    format!("growth: ignoring self-loop on node {} (edge {edge_idx})", u.index())
                });
                self.edge_parts[2 * edge_idx].deleted = true;
                self.edge_parts[2 * edge_idx + 1].deleted = true;
                continue;
            }
            let cost = self.costs[edge_idx];
            let u_cluster = ClusterId::from(u.index());
            let v_cluster = ClusterId::from(v.index());
            let u_active = self.clusters[u_cluster.index()].active;
            let v_active = self.clusters[v_cluster.index()].active;

            let (u_val, v_val) = if u_active && v_active {
                (cost / 2.0, cost / 2.0)
            } else if u_active {
                (cost, 0.0)
            } else if v_active {
                (0.0, cost)
            } else {
                continue;
            };

            if u_active {
                let part = EdgePartId::from(2 * edge_idx);
                self.edge_parts[part.index()].next_event_val = u_val;
                let handle = self
                    .heap_arena
                    .insert(&mut self.clusters[u_cluster.index()].edge_parts_root, u_val, part);
                self.edge_parts[part.index()].heap_node = Some(handle);
            }
            if v_active {
                let part = EdgePartId::from(2 * edge_idx + 1);
                self.edge_parts[part.index()].next_event_val = v_val;
                let handle = self
                    .heap_arena
                    .insert(&mut self.clusters[v_cluster.index()].edge_parts_root, v_val, part);
                self.edge_parts[part.index()].heap_node = Some(handle);
            }
        }

        for i in 0..num_nodes {
            if self.clusters[i].active {
                if let Some((value, _)) = self.heap_arena.peek_min(self.clusters[i].edge_parts_root) {
                    self.clusters_next_edge_event
                        .insert_or_update(value, ClusterId::from(i));
                }
            }
        }
    }

    /// Walks a cluster's merge-forest ancestry from `edge_part`'s endpoint
    /// node up to its current representative, returning the total moat
    /// sum covered so far on that side, the portion of it that belongs to
    /// already-finished (deactivated, or active-up-to-now) ancestors, and
    /// the representative cluster itself. Compresses the path it walks.
    fn get_sum_on_edge_part(&mut self, edge_part: EdgePartId) -> (f64, f64, ClusterId) {
        let edge_idx = edge_part.index() / 2;
        let (u, v) = self.edges[edge_idx];
        let node = if edge_part.index() % 2 == 0 { u } else { v };

        let mut current = ClusterId::from(node.index());
        let mut total_sum = 0.0;
        self.path_compression_visited.clear();

        while let Some(parent) = self.clusters[current.index()].merged_into {
            self.path_compression_visited.push((current, total_sum));
            if let Some(skip) = self.clusters[current.index()].skip_up {
                total_sum += self.clusters[current.index()].skip_up_sum;
                current = skip;
            } else {
                total_sum += self.clusters[current.index()].moat;
                current = parent;
            }
        }

        for (visited, sum_at_visit) in self.path_compression_visited.drain(..) {
            self.clusters[visited.index()].skip_up = Some(current);
            self.clusters[visited.index()].skip_up_sum = total_sum - sum_at_visit;
        }

        let finished_moat;
        if self.clusters[current.index()].active {
            finished_moat = total_sum;
            total_sum += self.current_time - self.clusters[current.index()].active_start;
        } else {
            total_sum += self.clusters[current.index()].moat;
            finished_moat = total_sum;
        }

        (total_sum, finished_moat, current)
    }

    fn handle_edge_event(&mut self, edge_part: EdgePartId) -> Result<(), PcstError> {
        if self.edge_parts[edge_part.index()].deleted {
            return Ok(());
        }
        let other_part = Self::other_edge_part(edge_part);
        let edge_idx = EdgeId::from(edge_part.index() / 2);
        let cost = self.costs[edge_idx.index()];
        let event_time = self.current_time;

        let (sum_cur, finished_cur, cluster_cur) = self.get_sum_on_edge_part(edge_part);
        let (sum_other, finished_other, cluster_other) = self.get_sum_on_edge_part(other_part);

        if cluster_cur == cluster_other {
            self.edge_parts[edge_part.index()].deleted = true;
            self.edge_parts[other_part.index()].deleted = true;
            return Ok(());
        }
        if self.edge_parts[other_part.index()].deleted {
            self.edge_parts[edge_part.index()].deleted = true;
            return Ok(());
        }

        let remainder = cost - sum_cur - sum_other;
        if remainder <= EPS * cost.max(1.0) {
            self.phase1_edges.push(edge_idx);
            self.edge_parts[other_part.index()].deleted = true;
            self.edge_parts[edge_part.index()].deleted = true;
            self.merge_clusters(cluster_cur, cluster_other, edge_idx, event_time, remainder.max(0.0))?;
            return Ok(());
        }

        let cur_active = self.clusters[cluster_cur.index()].active;
        let other_active = self.clusters[cluster_other.index()].active;

        if cur_active && other_active {
            let time_to_meet = event_time + remainder / 2.0;
            let val_at_meet_cur = sum_cur + remainder / 2.0;
            let val_at_meet_other = sum_other + remainder / 2.0;

            self.edge_parts[edge_part.index()].next_event_val = val_at_meet_cur;
            let root = &mut self.clusters[cluster_cur.index()].edge_parts_root;
            let handle = self.heap_arena.insert(root, time_to_meet, edge_part);
            self.edge_parts[edge_part.index()].heap_node = Some(handle);
            self.refresh_cluster_min(cluster_cur);

            let other_cluster_active_start = self.clusters[cluster_other.index()].active_start;
            let old_event_time_other =
                other_cluster_active_start + self.edge_parts[other_part.index()].next_event_val - finished_other;
            if let Some(other_handle) = self.edge_parts[other_part.index()].heap_node {
                self.clusters_next_edge_event.delete_element(cluster_other);
                let root = &mut self.clusters[cluster_other.index()].edge_parts_root;
                self.heap_arena
                    .decrease_key(root, other_handle, old_event_time_other, time_to_meet);
                self.edge_parts[other_part.index()].next_event_val = val_at_meet_other;
                self.refresh_cluster_min(cluster_other);
            } else {
                self.edge_parts[other_part.index()].next_event_val = val_at_meet_other;
            }
        } else {
            let (active_cluster, active_part, inactive_cluster, inactive_part, finished_moat_inactive) =
                if cur_active {
                    (cluster_cur, edge_part, cluster_other, other_part, finished_other)
                } else {
                    (cluster_other, other_part, cluster_cur, edge_part, finished_cur)
                };

            let time_to_meet = event_time + remainder;
            let val_at_meet_active = cost - finished_moat_inactive;

            self.edge_parts[active_part.index()].next_event_val = val_at_meet_active;
            let root = &mut self.clusters[active_cluster.index()].edge_parts_root;
            let handle = self.heap_arena.insert(root, time_to_meet, active_part);
            self.edge_parts[active_part.index()].heap_node = Some(handle);
            self.refresh_cluster_min(active_cluster);

            let Some(inactive_deactivation_time) = self.clusters[inactive_cluster.index()].active_end else {
                return Err(PcstError::Internal(format!(
                    "inactive cluster {} has no deactivation time",
                    inactive_cluster.index()
                )));
            };
            if let Some(inactive_handle) = self.edge_parts[inactive_part.index()].heap_node {
                let old_event_time_inactive = inactive_deactivation_time
                    + self.edge_parts[inactive_part.index()].next_event_val
                    - finished_moat_inactive;
                self.clusters_next_edge_event.delete_element(inactive_cluster);
                let root = &mut self.clusters[inactive_cluster.index()].edge_parts_root;
                self.heap_arena.decrease_key(
                    root,
                    inactive_handle,
                    old_event_time_inactive,
                    inactive_deactivation_time,
                );
                self.edge_parts[inactive_part.index()].next_event_val = finished_moat_inactive;
                self.refresh_cluster_min(inactive_cluster);
            } else {
                self.edge_parts[inactive_part.index()].next_event_val = finished_moat_inactive;
            }
        }

        Ok(())
    }

    fn refresh_cluster_min(&mut self, cluster: ClusterId) {
        if let Some((value, _)) = self
            .heap_arena
            .peek_min(self.clusters[cluster.index()].edge_parts_root)
        {
            self.clusters_next_edge_event.insert_or_update(value, cluster);
        }
    }

    fn merge_clusters(
        &mut self,
        cluster1: ClusterId,
        cluster2: ClusterId,
        edge: EdgeId,
        event_time: f64,
        remainder: f64,
    ) -> Result<(), PcstError> {
        let new_idx = ClusterId::from(self.clusters.len());

        let c1_active = self.clusters[cluster1.index()].active;
        let c2_active = self.clusters[cluster2.index()].active;

        // An `InactiveMergeEvent` (and the heap-offset shift it implies) is
        // only recorded when exactly one side was inactive; an active-active
        // merge gets neither, per `spec.md` §4.4.
        if c1_active != c2_active {
            let (_, _, u_repr) = self.get_sum_on_edge_part(EdgePartId::from(2 * edge.index()));
            let (_, _, v_repr) = self.get_sum_on_edge_part(EdgePartId::from(2 * edge.index() + 1));

            let (active_original, inactive_original) = if c1_active {
                (cluster1, cluster2)
            } else {
                (cluster2, cluster1)
            };

            let (u, v) = self.edges[edge.index()];
            let (active_node, inactive_node) = if u_repr == active_original && v_repr == inactive_original {
                (u, v)
            } else if v_repr == active_original && u_repr == inactive_original {
                (v, u)
            } else {
                return Err(PcstError::Internal(format!(
                    "merge_clusters: edge {} endpoints do not match the merging clusters",
                    edge.index()
                )));
            };

            self.inactive_merge_events.push(InactiveMergeEvent {
                active_cluster_index: active_original,
                inactive_cluster_index: inactive_original,
                active_cluster_node: active_node,
                inactive_cluster_node: inactive_node,
            });
            self.edge_info[edge.index()].inactive_merge_event = Some(self.inactive_merge_events.len() - 1);

            if self.clusters[inactive_original.index()].edge_parts_root.is_some() {
                let Some(active_end) = self.clusters[inactive_original.index()].active_end else {
                    return Err(PcstError::Internal(format!(
                        "inactive cluster {} has no deactivation time at merge",
                        inactive_original.index()
                    )));
                };
                let mut delta = (event_time + remainder) - active_end;
                if delta < -EPS {
                    self.log(LogLevel::Warning, || {
                        format!("growth: clamping negative heap offset {delta} to 0 on merge")
                    });
                }
                delta = delta.max(0.0);
                self.heap_arena
                    .add_to_heap(self.clusters[inactive_original.index()].edge_parts_root, delta);
            }
        }

        for side in [cluster1, cluster2] {
            if self.clusters[side.index()].active {
                let active_end = event_time + remainder;
                let active_start = self.clusters[side.index()].active_start;
                self.clusters[side.index()].active = false;
                self.clusters[side.index()].active_end = Some(active_end);
                self.clusters[side.index()].moat = active_end - active_start;
                self.clusters_deactivation.delete_element(side);
                if self.clusters[side.index()].edge_parts_root.is_some() {
                    self.clusters_next_edge_event.delete_element(side);
                }
                self.num_active_clusters -= 1;
            }
            self.clusters[side.index()].merged_into = Some(new_idx);
        }

        let c1 = self.clusters[cluster1.index()].clone();
        let c2 = self.clusters[cluster2.index()].clone();
        let mut merged_root = c1.edge_parts_root;
        let mut other_root = c2.edge_parts_root;
        let combined_root = self.heap_arena.meld(&mut merged_root, &mut other_root);

        let contains_root = c1.contains_root || c2.contains_root;
        let active = !contains_root;
        let active_start = event_time + remainder;
        let new_cluster = Cluster {
            edge_parts_root: combined_root,
            active,
            active_start,
            active_end: if contains_root { Some(active_start) } else { None },
            prize_sum: c1.prize_sum + c2.prize_sum,
            subcluster_moat_sum: c1.subcluster_moat_sum + c2.subcluster_moat_sum + c1.moat + c2.moat,
            moat: 0.0,
            contains_root,
            merged_into: None,
            merged_along: Some(edge),
            child_1: Some(cluster1),
            child_2: Some(cluster2),
            skip_up: None,
            skip_up_sum: 0.0,
            necessary: false,
        };

        if active {
            self.num_active_clusters += 1;
            let mut deactivation_time = active_start + new_cluster.prize_sum - new_cluster.subcluster_moat_sum;
            if deactivation_time < active_start - EPS {
                self.log(LogLevel::Warning, || {
                    format!("growth: clamping deactivation time {deactivation_time} below active_start {active_start}")
                });
            }
            deactivation_time = deactivation_time.max(active_start);
            self.clusters_deactivation
                .insert_or_update(deactivation_time, new_idx);
        }

        let min_event = self.heap_arena.peek_min(new_cluster.edge_parts_root);
        self.clusters.push(new_cluster);
        if active {
            if let Some((value, _)) = min_event {
                self.clusters_next_edge_event.insert_or_update(value, new_idx);
            }
        }
        Ok(())
    }

    fn handle_cluster_event(&mut self, cluster: ClusterId) -> Result<(), PcstError> {
        let active_start = self.clusters[cluster.index()].active_start;
        let deactivation_time = self.current_time;
        self.clusters[cluster.index()].active = false;
        self.clusters[cluster.index()].active_end = Some(deactivation_time);
        self.clusters[cluster.index()].moat = deactivation_time - active_start;
        self.num_active_clusters -= 1;
        if self.clusters[cluster.index()].edge_parts_root.is_some() {
            self.clusters_next_edge_event.delete_element(cluster);
        }
        Ok(())
    }

    fn get_next_edge_event(&mut self) -> Result<Option<(f64, ClusterId, EdgePartId)>, PcstError> {
        loop {
            let Some((global_value, cluster)) = self.clusters_next_edge_event.peek_min() else {
                return Ok(None);
            };
            if self.clusters[cluster.index()].edge_parts_root.is_none() {
                self.log(LogLevel::Warning, || {
                    format!("growth: dropping stale edge-event entry for cluster {}", cluster.index())
                });
                self.clusters_next_edge_event.delete_element(cluster);
                continue;
            }
            let Some((heap_value, part)) = self
                .heap_arena
                .peek_min(self.clusters[cluster.index()].edge_parts_root)
            else {
                return Err(PcstError::Internal(format!(
                    "cluster {} has a next-edge-event entry but an empty heap",
                    cluster.index()
                )));
            };
            if (global_value - heap_value).abs() > EPS * global_value.abs().max(1.0) {
                self.log(LogLevel::Warning, || {
                    format!(
                        "growth: mismatched global queue ({global_value}) and cluster heap ({heap_value}) for cluster {}",
                        cluster.index()
                    )
                });
            }
            return Ok(Some((heap_value, cluster, part)));
        }
    }

    fn remove_next_edge_event(&mut self, cluster: ClusterId) -> Result<(), PcstError> {
        self.clusters_next_edge_event.delete_element(cluster);
        let root = &mut self.clusters[cluster.index()].edge_parts_root;
        if self.heap_arena.delete_min(root).is_none() {
            return Err(PcstError::Internal(format!(
                "mismatched global priority queue and cluster heap for cluster {}",
                cluster.index()
            )));
        }
        self.refresh_cluster_min(cluster);
        Ok(())
    }

    fn get_next_cluster_event(&self) -> Option<(f64, ClusterId)> {
        self.clusters_deactivation.peek_min()
    }

    fn remove_next_cluster_event(&mut self) -> Result<(), PcstError> {
        if self.clusters_deactivation.delete_min().is_none() {
            return Err(PcstError::Internal(
                "remove_next_cluster_event called with an empty deactivation queue".to_owned(),
            ));
        }
        Ok(())
    }

    fn mark_good_nodes(&mut self) {
        let num_nodes = self.prizes.len();
        self.node_good = vec![false; num_nodes];

        if let Some(root) = self.root {
            let final_root_cluster = (0..self.clusters.len())
                .map(ClusterId::from)
                .find(|&c| self.clusters[c.index()].contains_root && self.clusters[c.index()].merged_into.is_none());
            match final_root_cluster {
                Some(c) => self.mark_nodes_as_good(c),
                None => {
                    self.log(LogLevel::Warning, || {
                        "growth: no final cluster contains the root; marking only the root node good".to_owned()
                    });
                    self.node_good[root.index()] = true;
                }
            }
        } else {
            // Every cluster nothing has merged into is a final component of
            // the forest, whether it is still active (the usual case when
            // `num_clusters > 0` stops growth early) or has already
            // deactivated on its own without being absorbed further.
            let roots: Vec<ClusterId> = (0..self.clusters.len())
                .map(ClusterId::from)
                .filter(|&c| self.clusters[c.index()].merged_into.is_none())
                .collect();
            for c in roots {
                self.mark_nodes_as_good(c);
            }
        }
    }

    fn mark_nodes_as_good(&mut self, start: ClusterId) {
        self.bfs_queue.clear();
        self.bfs_queue.push(start);
        let mut head = 0;
        while head < self.bfs_queue.len() {
            let current = self.bfs_queue[head];
            head += 1;
            let cluster = &self.clusters[current.index()];
            if cluster.merged_along.is_none() {
                self.node_good[current.index()] = true;
                continue;
            }
            if let Some(c1) = cluster.child_1 {
                self.bfs_queue.push(c1);
            }
            if let Some(c2) = cluster.child_2 {
                self.bfs_queue.push(c2);
            }
        }
    }

    fn build_result(self) -> GrowthResult {
        GrowthResult {
            phase1_edges: self.phase1_edges,
            node_good: self.node_good,
            edge_info: self.edge_info,
            inactive_merge_events: self.inactive_merge_events,
            clusters: self.clusters,
        }
    }
}
