use std::collections::BTreeSet;

use crate::graph::{NodeId, VoxelGraph};

/// Nodes of one detected centerline loop.
///
/// `proximal` and `distal` are the chain nodes closest to and farthest from
/// the volume centre; `centroid` is the mean chain position in voxel units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CenterlineCycle {
    nodes: BTreeSet<NodeId>,
    pub proximal: Option<NodeId>,
    pub distal: Option<NodeId>,
    pub centroid: Option<[f64; 3]>,
}

impl CenterlineCycle {
    pub(crate) fn from_nodes(nodes: BTreeSet<NodeId>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &BTreeSet<NodeId> {
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

    pub(crate) fn remove(&mut self, node: NodeId) -> bool {
        self.nodes.remove(&node)
    }

    /// Cycle node with the smallest distance-from-edge (first on ties).
    pub fn narrow_node(&self, graph: &VoxelGraph) -> Option<NodeId> {
        let mut best: Option<(NodeId, u16)> = None;
        for &id in &self.nodes {
            let dfe = graph.node(id).dfe;
            if best.map_or(true, |(_, b)| dfe < b) {
                best = Some((id, dfe));
            }
        }
        best.map(|(id, _)| id)
    }
}
