use log::{debug, warn};
use std::collections::BTreeMap;

use super::line::Centerline;
use super::node_data::{assign_closest_belong_nodes, CenterlineNodeData};
use super::CenterlineId;
use crate::cycles::CenterlineCycle;
use crate::distance::VoxelDistance;
use crate::graph::{NodeId, VoxelGraph};

/// Skeleton tree of one connected structure.
///
/// Holds handles into the [`VoxelGraph`] it was built on; every method that
/// changes node flags takes that graph explicitly.
#[derive(Clone, Debug, Default)]
pub struct CenterlineGraph {
    pub id: usize,
    source: Option<NodeId>,
    tree_ends: Vec<NodeId>,
    good_ends: Vec<NodeId>,
    centerlines: Vec<Centerline>,
    cycles: Vec<CenterlineCycle>,
    /// Per centerline node belonging data, filled by [`Self::assign_node_data`].
    pub node_data: BTreeMap<NodeId, CenterlineNodeData>,
}

impl CenterlineGraph {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn set_source(&mut self, graph: &mut VoxelGraph, source: NodeId) {
        graph.node_mut(source).is_centerline = true;
        graph.set_source(source);
        self.source = Some(source);
    }

    /// Register a leaf; the node is flagged as centerline if it was not.
    pub fn add_tree_end(&mut self, graph: &mut VoxelGraph, node: NodeId) {
        graph.node_mut(node).is_centerline = true;
        if !self.tree_ends.contains(&node) {
            self.tree_ends.push(node);
        }
    }

    pub fn tree_ends(&self) -> &[NodeId] {
        &self.tree_ends
    }

    pub fn set_good_ends(&mut self, ends: Vec<NodeId>) {
        self.good_ends = ends;
    }

    /// Curated ends when any were set, the raw tree ends otherwise.
    pub fn good_ends(&self) -> &[NodeId] {
        if self.good_ends.is_empty() {
            &self.tree_ends
        } else {
            &self.good_ends
        }
    }

    /// Add a branch; members are flagged as centerline and linked back to it.
    pub fn add_centerline(
        &mut self,
        graph: &mut VoxelGraph,
        nodes: Vec<NodeId>,
        bifurcation: Option<NodeId>,
    ) -> CenterlineId {
        let id = CenterlineId(self.centerlines.len() as u32);
        for &n in &nodes {
            let node = graph.node_mut(n);
            node.is_centerline = true;
            node.centerline = Some(id);
        }
        if let Some(b) = bifurcation {
            graph.node_mut(b).is_bifurcation = true;
        }
        let mut line = Centerline::new(id, self.id, nodes);
        line.bifurcation = bifurcation;
        self.centerlines.push(line);
        id
    }

    pub fn centerline(&self, id: CenterlineId) -> Option<&Centerline> {
        self.centerlines.get(id.index())
    }

    pub fn centerlines(&self) -> &[Centerline] {
        &self.centerlines
    }

    /// All member nodes of all branches, branch by branch.
    pub fn centerline_nodes(&self) -> Vec<NodeId> {
        self.centerlines
            .iter()
            .flat_map(|c| c.nodes().iter().copied())
            .collect()
    }

    /// Detach `node` from its owning branch and clear its back-reference.
    ///
    /// Returns false, with a warning, when the node has no owner or the owner
    /// no longer lists it.
    pub fn remove_from_centerline(&mut self, graph: &mut VoxelGraph, node: NodeId) -> bool {
        let owner = graph.node_mut(node).centerline.take();
        let removed = owner
            .and_then(|id| self.centerlines.get_mut(id.index()))
            .is_some_and(|line| line.remove(node));
        if !removed {
            warn!(
                "CenterlineGraph {}: node {} missing from centerline {:?}",
                self.id,
                graph.position(node),
                owner
            );
        }
        removed
    }

    pub fn add_cycle(&mut self, cycle: CenterlineCycle) {
        debug!(
            "CenterlineGraph {}: cycle of {} nodes recorded",
            self.id,
            cycle.nodes().len()
        );
        self.cycles.push(cycle);
    }

    pub fn cycles(&self) -> &[CenterlineCycle] {
        &self.cycles
    }

    /// Assign every voxel of `graph` to its nearest member node and rebuild
    /// each branch's `surround` from the non-centerline voxels of its nodes.
    pub fn assign_node_data(&mut self, graph: &mut VoxelGraph, distance: &VoxelDistance) {
        let nodes = self.centerline_nodes();
        self.node_data = assign_closest_belong_nodes(graph, &nodes, distance);
        for line in &mut self.centerlines {
            line.surround.clear();
        }
        for (&c, data) in &self.node_data {
            let Some(line) = graph
                .node(c)
                .centerline
                .and_then(|id| self.centerlines.get_mut(id.index()))
            else {
                continue;
            };
            line.surround.extend(
                data.belonging
                    .iter()
                    .copied()
                    .filter(|&n| !graph.node(n).is_centerline),
            );
        }
    }
}
