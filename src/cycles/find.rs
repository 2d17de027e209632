use log::debug;
use nalgebra::Vector3;
use std::collections::BTreeSet;

use super::cycle::CenterlineCycle;
use crate::centerline::path::{backtrace, centerline_bfs};
use crate::distance::VoxelDistance;
use crate::graph::{NodeId, VoxelGraph};
use crate::types::Dims;

/// Find the loop closed by `patch`.
///
/// Runs a breadth-first search over centerline nodes from `patch[0]` to the
/// last patch node without using the patch itself: interior patch nodes are
/// blocked and edges between consecutive patch nodes are skipped. The chain
/// found plus the whole patch forms the cycle.
///
/// Returns an empty cycle when the patch is empty, its first node is not a
/// centerline node, or the end cannot be reached around the loop.
pub fn find_cycle(
    graph: &mut VoxelGraph,
    patch: &[NodeId],
    dims: Dims,
    distance: &VoxelDistance,
) -> CenterlineCycle {
    let (Some(&s), Some(&end)) = (patch.first(), patch.last()) else {
        return CenterlineCycle::default();
    };
    let patch_edges: BTreeSet<(NodeId, NodeId)> = patch
        .windows(2)
        .flat_map(|w| [(w[0], w[1]), (w[1], w[0])])
        .collect();
    let interior: &[NodeId] = if patch.len() > 2 {
        &patch[1..patch.len() - 1]
    } else {
        &[]
    };

    let reached = centerline_bfs(
        graph,
        s,
        end,
        |g| {
            for &n in interior {
                g.node_mut(n).search.visited = true;
            }
        },
        |a, b| patch_edges.contains(&(a, b)),
    );
    if !reached || s == end {
        debug!(
            "find_cycle: no loop from {} (centerline={}, reached={})",
            graph.position(s),
            graph.node(s).is_centerline,
            reached
        );
        return CenterlineCycle::default();
    }
    let chain = backtrace(graph, s, end);
    if chain.is_empty() {
        return CenterlineCycle::default();
    }

    let center = dims.center();
    let mut proximal = (s, distance.distance_to_point(&graph.position(s), &center));
    let mut distal = proximal;
    let mut sum = Vector3::<f64>::zeros();
    for &id in &chain {
        let p = graph.position(id);
        let r = distance.distance_to_point(&p, &center);
        if r < proximal.1 {
            proximal = (id, r);
        }
        if r > distal.1 {
            distal = (id, r);
        }
        sum += p.to_vector();
    }
    let mean = sum / chain.len() as f64;

    let nodes: BTreeSet<NodeId> = chain.iter().chain(patch).copied().collect();
    let mut cycle = CenterlineCycle::from_nodes(nodes);
    cycle.proximal = Some(proximal.0);
    cycle.distal = Some(distal.0);
    cycle.centroid = Some([mean.x, mean.y, mean.z]);
    debug!(
        "find_cycle: {} nodes, proximal {} distal {}",
        cycle.len(),
        graph.position(proximal.0),
        graph.position(distal.0)
    );
    cycle
}
