use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};

use super::cycle::CenterlineCycle;
use super::find::find_cycle;
use super::narrow::remove_narrow_shortcut;
use super::options::{BreakStrategy, LoopRepairOptions};
use crate::centerline::CenterlineGraph;
use crate::distance::VoxelDistance;
use crate::graph::{NodeId, SearchColor, VoxelGraph};
use crate::types::{Dims, Position};

/// Unsettled ends of a severed loop.
///
/// `cycle_front` holds unflagged nodes that were part of the cycle,
/// `break_front` the ones taken from the rest of the tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepairFronts {
    pub cycle_front: BTreeSet<NodeId>,
    pub break_front: BTreeSet<NodeId>,
}

impl RepairFronts {
    /// Pair the first two cycle-front nodes with the first two break-front
    /// nodes so that the closest cross pair is kept. Empty when either front
    /// has fewer than two nodes.
    ///
    /// Distances are in voxel units, unlike the resolution-weighted distances
    /// used elsewhere in this module: the fronts are adjacent voxels on the
    /// same grid, and reconnection is done on that grid.
    pub fn pair_connect(&self, graph: &VoxelGraph) -> Vec<(NodeId, NodeId)> {
        let cf: Vec<NodeId> = self.cycle_front.iter().take(2).copied().collect();
        let bf: Vec<NodeId> = self.break_front.iter().take(2).copied().collect();
        if cf.len() < 2 || bf.len() < 2 {
            return Vec::new();
        }
        let d = |a: NodeId, b: NodeId| {
            (graph.position(a).to_vector() - graph.position(b).to_vector()).norm()
        };
        let straight = d(cf[0], bf[0]).min(d(cf[1], bf[1]));
        let crossed = d(cf[0], bf[1]).min(d(cf[1], bf[0]));
        if straight <= crossed {
            vec![(cf[0], bf[0]), (cf[1], bf[1])]
        } else {
            vec![(cf[0], bf[1]), (cf[1], bf[0])]
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BackupOutcome {
    pub fronts: RepairFronts,
    /// Nodes unflagged as centerline, in visiting order.
    pub unflagged: Vec<NodeId>,
    /// Nodes that were expected in a centerline list but were absent.
    pub missing_removals: usize,
}

/// Sever the tree around `break_node`.
///
/// Bounded breadth-first walk over centerline nodes starting at `break_node`;
/// at most `limit` nodes (the break node included) are unflagged and removed
/// from their centerline. Nodes removed from `cycle` enter the cycle front,
/// others the break front; a node leaves both fronts once its neighbours were
/// processed. `fronts` is returned updated in the outcome.
pub fn backup_centerline(
    graph: &mut VoxelGraph,
    centerlines: &mut CenterlineGraph,
    break_node: NodeId,
    cycle: &mut CenterlineCycle,
    fronts: RepairFronts,
    limit: usize,
) -> BackupOutcome {
    let mut out = BackupOutcome {
        fronts,
        ..BackupOutcome::default()
    };
    if !graph.node(break_node).is_centerline || limit == 0 {
        return out;
    }
    graph.reset_search_state();

    unflag(graph, centerlines, break_node, &mut out);
    cycle.remove(break_node);
    {
        let s = &mut graph.node_mut(break_node).search;
        s.visited = true;
        s.color = SearchColor::Frontier;
        s.cost = Some(0.0);
    }
    let mut queue = VecDeque::from([break_node]);
    let mut adj = Vec::new();
    while let Some(u) = queue.pop_front() {
        if out.unflagged.len() >= limit {
            break;
        }
        graph.neighbours_into(u, &mut adj);
        let cost_u = graph.node(u).search.cost.unwrap_or(0.0);
        for &v in &adj {
            if out.unflagged.len() >= limit {
                break;
            }
            let node = graph.node(v);
            if !node.is_centerline || node.search.visited {
                continue;
            }
            unflag(graph, centerlines, v, &mut out);
            if cycle.remove(v) {
                out.fronts.cycle_front.insert(v);
            } else {
                out.fronts.break_front.insert(v);
            }
            let s = &mut graph.node_mut(v).search;
            s.visited = true;
            s.color = SearchColor::Frontier;
            s.cost = Some(cost_u + 1.0);
            s.predecessor = Some(u);
            queue.push_back(v);
        }
        graph.node_mut(u).search.color = SearchColor::Settled;
        out.fronts.cycle_front.remove(&u);
        out.fronts.break_front.remove(&u);
    }
    debug!(
        "backup_centerline: from {} unflagged {} (limit {}), fronts cycle={} break={}",
        graph.position(break_node),
        out.unflagged.len(),
        limit,
        out.fronts.cycle_front.len(),
        out.fronts.break_front.len()
    );
    out
}

pub(super) fn unflag(
    graph: &mut VoxelGraph,
    centerlines: &mut CenterlineGraph,
    node: NodeId,
    out: &mut BackupOutcome,
) {
    graph.node_mut(node).is_centerline = false;
    if !centerlines.remove_from_centerline(graph, node) {
        out.missing_removals += 1;
    }
    out.unflagged.push(node);
}

/// Nodes reachable from `s` within `iterations` dequeues of a breadth-first
/// search over all adjacency, `s` included.
pub fn contiguous_voxel_set(graph: &mut VoxelGraph, s: NodeId, iterations: usize) -> BTreeSet<NodeId> {
    graph.reset_search_state();
    let mut set = BTreeSet::from([s]);
    {
        let st = &mut graph.node_mut(s).search;
        st.color = SearchColor::Frontier;
        st.cost = Some(0.0);
    }
    let mut queue = VecDeque::from([s]);
    let mut adj = Vec::new();
    let mut i = 0;
    while i < iterations {
        let Some(u) = queue.pop_front() else {
            break;
        };
        graph.neighbours_into(u, &mut adj);
        let cost_u = graph.node(u).search.cost.unwrap_or(0.0);
        for &v in &adj {
            if graph.node(v).search.color != SearchColor::Unvisited {
                continue;
            }
            let st = &mut graph.node_mut(v).search;
            st.color = SearchColor::Frontier;
            st.cost = Some(cost_u + 1.0);
            st.predecessor = Some(u);
            set.insert(v);
            queue.push_back(v);
        }
        graph.node_mut(u).search.color = SearchColor::Settled;
        i += 1;
    }
    set
}

/// Result of [`repair_loop`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct RepairReport {
    pub cycle_size: usize,
    pub proximal: Option<Position>,
    pub distal: Option<Position>,
    pub z_cutoff: i32,
    pub broken: bool,
    pub unflagged: usize,
    pub missing_removals: usize,
    /// Suggested reconnections between the two severed fronts.
    pub pairs: Vec<(Position, Position)>,
    /// Centerline nodes removed by a narrow-shortcut break.
    pub shortcut: Vec<Position>,
}

/// Detect the loop closed by `patch`, record it on `centerlines`, and break
/// it according to `options.strategy`.
///
/// [`BreakStrategy::ProximalBackup`] backs up from the proximal node when the
/// z cut-off policy allows. [`BreakStrategy::NarrowShortcut`] always removes
/// the centerline run between the bifurcations around the narrow node.
pub fn repair_loop(
    graph: &mut VoxelGraph,
    centerlines: &mut CenterlineGraph,
    patch: &[NodeId],
    dims: Dims,
    distance: &VoxelDistance,
    options: &LoopRepairOptions,
) -> RepairReport {
    let mut cycle = find_cycle(graph, patch, dims, distance);
    let mut report = RepairReport {
        cycle_size: cycle.len(),
        proximal: cycle.proximal.map(|id| graph.position(id)),
        distal: cycle.distal.map(|id| graph.position(id)),
        z_cutoff: options.z_cutoff(dims.depth),
        ..RepairReport::default()
    };
    let Some(proximal) = cycle.proximal else {
        return report;
    };
    if options.strategy == BreakStrategy::NarrowShortcut {
        let outcome = remove_narrow_shortcut(graph, centerlines, &mut cycle);
        report.broken = !outcome.unflagged.is_empty();
        report.unflagged = outcome.unflagged.len();
        report.missing_removals = outcome.missing_removals;
        report.shortcut = outcome
            .unflagged
            .iter()
            .map(|&id| graph.position(id))
            .collect();
        if !report.broken {
            debug!("repair_loop: no bifurcation pair around the narrow node");
        }
        centerlines.add_cycle(cycle);
        return report;
    }
    let pz = graph.position(proximal).z;
    if options.should_break(pz, dims.depth) {
        debug!(
            "repair_loop: breaking at {} (z {} > cutoff {})",
            graph.position(proximal),
            pz,
            report.z_cutoff
        );
        let outcome = backup_centerline(
            graph,
            centerlines,
            proximal,
            &mut cycle,
            RepairFronts::default(),
            options.backup_limit,
        );
        if outcome.missing_removals > 0 {
            warn!(
                "repair_loop: {} nodes were missing from their centerline",
                outcome.missing_removals
            );
        }
        report.broken = true;
        report.unflagged = outcome.unflagged.len();
        report.missing_removals = outcome.missing_removals;
        report.pairs = outcome
            .fronts
            .pair_connect(graph)
            .into_iter()
            .map(|(a, b)| (graph.position(a), graph.position(b)))
            .collect();
    }
    centerlines.add_cycle(cycle);
    report
}
