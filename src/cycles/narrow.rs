//! Narrow-point loop breaking.
//!
//! Instead of backing up from the proximal node, remove the centerline run
//! between the two bifurcations nearest to the thinnest voxel of the loop.
use log::debug;
use std::collections::{BTreeSet, VecDeque};

use super::cycle::CenterlineCycle;
use super::repair::{contiguous_voxel_set, unflag, BackupOutcome};
use crate::centerline::{path_bfs, CenterlineGraph};
use crate::distance::{to_fixed, VoxelDistance};
use crate::graph::{NodeId, SearchColor, VoxelGraph};

/// Up to two bifurcation nodes nearest (in centerline hops) to the cycle's
/// narrow node, in the order they are reached.
///
/// Breadth-first over centerline nodes from the narrow node; the narrow node
/// itself counts when it is a bifurcation.
pub fn narrow_bifurcations(graph: &mut VoxelGraph, cycle: &CenterlineCycle) -> Vec<NodeId> {
    let Some(s) = cycle.narrow_node(graph) else {
        return Vec::new();
    };
    graph.reset_search_state();
    let mut found = Vec::with_capacity(2);
    if !graph.node(s).is_centerline {
        return found;
    }
    {
        let st = &mut graph.node_mut(s).search;
        st.visited = true;
        st.color = SearchColor::Frontier;
        st.cost = Some(0.0);
    }
    let mut queue = VecDeque::from([s]);
    let mut adj = Vec::new();
    while let Some(u) = queue.pop_front() {
        if graph.node(u).is_bifurcation {
            found.push(u);
            if found.len() == 2 {
                break;
            }
        }
        graph.neighbours_into(u, &mut adj);
        let cost_u = graph.node(u).search.cost.unwrap_or(0.0);
        for &v in &adj {
            let node = graph.node(v);
            if !node.is_centerline || node.search.visited {
                continue;
            }
            let st = &mut graph.node_mut(v).search;
            st.visited = true;
            st.color = SearchColor::Frontier;
            st.cost = Some(cost_u + 1.0);
            st.predecessor = Some(u);
            queue.push_back(v);
        }
        graph.node_mut(u).search.color = SearchColor::Settled;
    }
    found
}

/// Centerline path between the two [`narrow_bifurcations`], both ends
/// included. Empty when fewer than two bifurcations are reachable.
pub fn narrow_bifurcations_path(graph: &mut VoxelGraph, cycle: &CenterlineCycle) -> Vec<NodeId> {
    let bifurcations = narrow_bifurcations(graph, cycle);
    match bifurcations[..] {
        [a, b] => path_bfs(graph, a, b),
        _ => Vec::new(),
    }
}

/// Unflag and detach the interior of [`narrow_bifurcations_path`].
///
/// The two bifurcations stay on the centerline; removed nodes also leave
/// `cycle`. Nothing changes when no path exists.
pub fn remove_narrow_shortcut(
    graph: &mut VoxelGraph,
    centerlines: &mut CenterlineGraph,
    cycle: &mut CenterlineCycle,
) -> BackupOutcome {
    let mut out = BackupOutcome::default();
    let path = narrow_bifurcations_path(graph, cycle);
    if path.len() < 3 {
        return out;
    }
    for &node in &path[1..path.len() - 1] {
        unflag(graph, centerlines, node, &mut out);
        cycle.remove(node);
    }
    debug!(
        "remove_narrow_shortcut: {} nodes between {} and {}",
        out.unflagged.len(),
        graph.position(path[0]),
        graph.position(path[path.len() - 1])
    );
    out
}

/// Radius of the loop's narrow node in voxels: the largest centerline
/// distance among the voxels belonging to it, over the coarsest spacing,
/// rounded up. Zero without belonging data for that node.
pub fn narrow_radius(
    graph: &VoxelGraph,
    centerlines: &CenterlineGraph,
    cycle: &CenterlineCycle,
    distance: &VoxelDistance,
) -> usize {
    let Some(data) = cycle
        .narrow_node(graph)
        .and_then(|n| centerlines.node_data.get(&n))
    else {
        return 0;
    };
    let step = to_fixed(distance.max_resolution()).max(1) as usize;
    (data.max_dfc() as usize + step - 1) / step
}

/// Voxels around the narrow node within [`narrow_radius`] search steps.
pub fn erode_narrow(
    graph: &mut VoxelGraph,
    centerlines: &CenterlineGraph,
    cycle: &CenterlineCycle,
    distance: &VoxelDistance,
) -> BTreeSet<NodeId> {
    let Some(narrow) = cycle.narrow_node(graph) else {
        return BTreeSet::new();
    };
    let range = narrow_radius(graph, centerlines, cycle, distance);
    contiguous_voxel_set(graph, narrow, range)
}
