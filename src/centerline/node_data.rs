use log::debug;
use std::collections::BTreeMap;

use crate::distance::{to_fixed, VoxelDistance};
use crate::graph::{NodeId, VoxelGraph};

/// Voxels assigned to one centerline node, with their edge and centerline
/// distance aggregates (same fixed-point units as `VoxelNode::dfe`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CenterlineNodeData {
    pub belonging: Vec<NodeId>,
    sum_dfe: u64,
    max_dfe: u16,
    sum_dfc: u64,
    max_dfc: u16,
}

impl CenterlineNodeData {
    fn push(&mut self, id: NodeId, dfe: u16, dfc: u16) {
        self.belonging.push(id);
        self.sum_dfe += dfe as u64;
        self.max_dfe = self.max_dfe.max(dfe);
        self.sum_dfc += dfc as u64;
        self.max_dfc = self.max_dfc.max(dfc);
    }

    pub fn len(&self) -> usize {
        self.belonging.len()
    }

    pub fn is_empty(&self) -> bool {
        self.belonging.is_empty()
    }

    pub fn mean_dfe(&self) -> f32 {
        if self.belonging.is_empty() {
            0.0
        } else {
            self.sum_dfe as f32 / self.belonging.len() as f32
        }
    }

    pub fn max_dfe(&self) -> u16 {
        self.max_dfe
    }

    pub fn mean_dfc(&self) -> f32 {
        if self.belonging.is_empty() {
            0.0
        } else {
            self.sum_dfc as f32 / self.belonging.len() as f32
        }
    }

    pub fn max_dfc(&self) -> u16 {
        self.max_dfc
    }
}

/// Attach every node of `graph` to its nearest centerline node.
///
/// Linear scan over `centerline_nodes` per voxel (resolution-weighted
/// distance, first found on ties). Sets `closest_centerline` and `dfc` (that
/// distance in fixed-point units, zero on the centerline itself) on each voxel
/// and returns one bucket per centerline node, empty buckets included.
pub fn assign_closest_belong_nodes(
    graph: &mut VoxelGraph,
    centerline_nodes: &[NodeId],
    distance: &VoxelDistance,
) -> BTreeMap<NodeId, CenterlineNodeData> {
    let mut buckets: BTreeMap<NodeId, CenterlineNodeData> = centerline_nodes
        .iter()
        .map(|&c| (c, CenterlineNodeData::default()))
        .collect();
    if centerline_nodes.is_empty() {
        return buckets;
    }
    let ids: Vec<NodeId> = graph.ids().collect();
    for id in ids {
        let p = graph.position(id);
        let mut best: Option<(NodeId, f64)> = None;
        for &c in centerline_nodes {
            let d = distance.distance(&p, &graph.position(c));
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        let Some((closest, d)) = best else {
            continue;
        };
        let node = graph.node_mut(id);
        node.closest_centerline = Some(closest);
        node.dfc = to_fixed(d as f32);
        let (dfe, dfc) = (node.dfe, node.dfc);
        if let Some(bucket) = buckets.get_mut(&closest) {
            bucket.push(id, dfe, dfc);
        }
    }
    debug!(
        "assign_closest_belong_nodes: {} voxels over {} centerline nodes",
        graph.len(),
        centerline_nodes.len()
    );
    buckets
}
