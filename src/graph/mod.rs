//! Arena-backed voxel adjacency graph.
//!
//! One [`VoxelGraph`] holds the foreground voxels of a single connected
//! structure. Nodes are addressed by [`NodeId`] handles; adjacency sets store
//! handles, never references, so back-links (node → centerline → centerline
//! graph) stay plain indices.
//!
//! Search scratch state
//! - Every node carries a [`SearchState`] group (cost, predecessor, colour,
//!   visited flag, cumulative distance, DFM). Breadth-first searches, cycle
//!   detection, loop repair and tortuosity all reuse these fields.
//! - Each of those algorithms calls [`VoxelGraph::reset_search_state`] before
//!   touching a node, so no traversal observes state left by another.
//! - Separate graphs share nothing; [`reset_all`] and [`find_best_source_nodes`]
//!   process many graphs in parallel when the `parallel` feature is enabled.

pub mod build;
mod node;

pub use build::{connected_graphs, GraphBuildOptions};
pub use node::{NodeId, SearchColor, SearchState, VoxelNode};

use log::debug;
use nalgebra::Vector3;
use std::collections::HashMap;

use crate::distance::VoxelDistance;
use crate::types::Position;

#[derive(Clone, Debug, Default)]
pub struct VoxelGraph {
    nodes: Vec<VoxelNode>,
    lookup: HashMap<Position, NodeId>,
    source: Option<NodeId>,
}

impl VoxelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one node per distinct position, without adjacency.
    pub fn from_positions<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        let mut graph = Self::new();
        for p in positions {
            graph.add_node(p);
        }
        graph
    }

    /// Insert a node; an existing node at the same position is returned as is.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        if let Some(&id) = self.lookup.get(&position) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(VoxelNode::new(position));
        self.lookup.insert(position, id);
        id
    }

    /// Symmetric connection: `a` joins `b`'s adjacency and vice versa.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        self.nodes[a.index()].adjacent.insert(b);
        self.nodes[b.index()].adjacent.insert(a);
    }

    /// Connect every pair of nodes whose positions are 26-neighbours.
    pub fn connect_grid_neighbours(&mut self) {
        for i in 0..self.nodes.len() {
            let p = self.nodes[i].position;
            for (dx, dy, dz) in crate::types::NEIGH_26 {
                if let Some(&other) = self.lookup.get(&p.offset(dx, dy, dz)) {
                    self.connect(NodeId(i as u32), other);
                }
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &VoxelNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut VoxelNode {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[VoxelNode] {
        &self.nodes
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    pub fn node_at(&self, position: &Position) -> Option<NodeId> {
        self.lookup.get(position).copied()
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id.index()].position
    }

    /// Copy `id`'s neighbours into `out`, replacing its contents.
    #[inline]
    pub fn neighbours_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.clear();
        out.extend(self.nodes[id.index()].adjacent.iter().copied());
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = Some(source);
    }

    /// Restore the search scratch group of every node.
    pub fn reset_search_state(&mut self) {
        for n in &mut self.nodes {
            n.search.reset();
        }
    }

    /// Restore the search scratch group of the listed nodes only.
    pub fn reset_nodes(&mut self, ids: &[NodeId]) {
        for id in ids {
            self.nodes[id.index()].search.reset();
        }
    }

    /// Deepest slice index occupied by the graph.
    pub fn max_z(&self) -> i32 {
        self.nodes.iter().map(|n| n.position.z).max().unwrap_or(0)
    }

    /// Nodes currently flagged as centerline, in arena order.
    pub fn centerline_nodes(&self) -> Vec<NodeId> {
        self.ids()
            .filter(|&id| self.nodes[id.index()].is_centerline)
            .collect()
    }

    /// Pick the root of the graph.
    ///
    /// With any positive modified distance-from-edge, the candidates are the
    /// connected nodes with maximal `mdfe`; otherwise the connected nodes with
    /// the minimal non-zero `weight`. Ties resolve to the candidate nearest the
    /// centroid of all candidates (first found on equal distance).
    pub fn find_best_source_node(&mut self, distance: &VoxelDistance) -> Option<NodeId> {
        let has_mdfe = self.nodes.iter().any(|n| n.mdfe > 0.0);
        let mut ties: Vec<NodeId> = Vec::new();
        if has_mdfe {
            let mut best = 0.0f32;
            for id in self.ids() {
                let n = &self.nodes[id.index()];
                if n.degree() == 0 || n.mdfe < best {
                    continue;
                }
                if n.mdfe > best {
                    ties.clear();
                    best = n.mdfe;
                }
                ties.push(id);
            }
        } else {
            let mut best = f32::INFINITY;
            for id in self.ids() {
                let n = &self.nodes[id.index()];
                if n.degree() == 0 || n.weight == 0.0 || n.weight > best {
                    continue;
                }
                if n.weight < best {
                    ties.clear();
                    best = n.weight;
                }
                ties.push(id);
            }
        }

        let chosen = match ties.len() {
            0 => None,
            1 => Some(ties[0]),
            len => {
                let centroid = ties
                    .iter()
                    .fold(Vector3::zeros(), |acc: Vector3<f64>, id| {
                        acc + self.position(*id).to_vector()
                    })
                    / len as f64;
                let mut best: Option<(NodeId, f64)> = None;
                for &id in &ties {
                    let d = distance.distance_to_point(&self.position(id), &centroid);
                    if best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((id, d));
                    }
                }
                best.map(|(id, _)| id)
            }
        };
        debug!(
            "VoxelGraph: {} nodes, {} source ties (mdfe={}), source={:?}",
            self.nodes.len(),
            ties.len(),
            has_mdfe,
            chosen.map(|id| self.position(id))
        );
        if let Some(id) = chosen {
            self.source = Some(id);
        }
        chosen
    }
}

/// Reset the scratch state of many disjoint graphs.
pub fn reset_all(graphs: &mut [VoxelGraph]) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        graphs.par_iter_mut().for_each(VoxelGraph::reset_search_state);
    }
    #[cfg(not(feature = "parallel"))]
    {
        graphs.iter_mut().for_each(VoxelGraph::reset_search_state);
    }
}

/// Select a source node for each graph; disjoint graphs run in parallel.
pub fn find_best_source_nodes(
    graphs: &mut [VoxelGraph],
    distance: &VoxelDistance,
) -> Vec<Option<NodeId>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        graphs
            .par_iter_mut()
            .map(|g| g.find_best_source_node(distance))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        graphs
            .iter_mut()
            .map(|g| g.find_best_source_node(distance))
            .collect()
    }
}

#[cfg(test)]
mod tests;
