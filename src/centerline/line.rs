use nalgebra::Vector3;
use serde::Serialize;
use std::cmp::Ordering;

use super::CenterlineId;
use crate::graph::{NodeId, VoxelGraph};

/// One branch of a centerline tree: an ordered run of centerline nodes.
#[derive(Clone, Debug)]
pub struct Centerline {
    pub id: CenterlineId,
    /// Id of the owning [`super::CenterlineGraph`].
    pub graph_id: usize,
    nodes: Vec<NodeId>,
    /// Node where this branch leaves its parent, if any.
    pub bifurcation: Option<NodeId>,
    /// Non-centerline voxels whose nearest centerline node is on this branch,
    /// filled by [`super::CenterlineGraph::assign_node_data`].
    pub surround: Vec<NodeId>,
}

/// Summary statistics of one centerline, computed on demand.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CenterlineStats {
    pub node_count: usize,
    pub mean_dfe: f32,
    pub max_dfe: u16,
    pub min_z: i32,
    pub max_z: i32,
    pub mean_position: [f64; 3],
}

impl Centerline {
    pub(crate) fn new(id: CenterlineId, graph_id: usize, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            graph_id,
            nodes,
            bifurcation: None,
            surround: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Remove `node` from the ordered list; false when it was not a member.
    pub(crate) fn remove(&mut self, node: NodeId) -> bool {
        match self.nodes.iter().position(|&n| n == node) {
            Some(i) => {
                self.nodes.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn stats(&self, graph: &VoxelGraph) -> CenterlineStats {
        if self.nodes.is_empty() {
            return CenterlineStats {
                node_count: 0,
                mean_dfe: 0.0,
                max_dfe: 0,
                min_z: 0,
                max_z: 0,
                mean_position: [0.0; 3],
            };
        }
        let mut sum_dfe = 0u64;
        let mut max_dfe = 0u16;
        let mut min_z = i32::MAX;
        let mut max_z = i32::MIN;
        let mut sum_pos = Vector3::<f64>::zeros();
        for &id in &self.nodes {
            let n = graph.node(id);
            sum_dfe += n.dfe as u64;
            max_dfe = max_dfe.max(n.dfe);
            min_z = min_z.min(n.position.z);
            max_z = max_z.max(n.position.z);
            sum_pos += n.position.to_vector();
        }
        let count = self.nodes.len();
        let mean = sum_pos / count as f64;
        CenterlineStats {
            node_count: count,
            mean_dfe: sum_dfe as f32 / count as f32,
            max_dfe,
            min_z,
            max_z,
            mean_position: [mean.x, mean.y, mean.z],
        }
    }
}

impl CenterlineStats {
    /// Deeper branches (larger max z) first.
    pub fn cmp_deeper(a: &Self, b: &Self) -> Ordering {
        b.max_z.cmp(&a.max_z)
    }

    /// Longer branches first.
    pub fn cmp_longer(a: &Self, b: &Self) -> Ordering {
        b.node_count.cmp(&a.node_count)
    }
}
