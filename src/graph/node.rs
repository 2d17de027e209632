use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::centerline::CenterlineId;
use crate::types::Position;

/// Handle of a node inside one [`super::VoxelGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tri-colour marker used by breadth-first searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchColor {
    #[default]
    Unvisited,
    Frontier,
    Settled,
}

/// Scratch fields owned by whichever traversal is currently running.
///
/// Every traversal resets this group before it starts; see
/// [`super::VoxelGraph::reset_search_state`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    /// Path cost from the search origin; `None` means not reached.
    pub cost: Option<f32>,
    pub predecessor: Option<NodeId>,
    pub color: SearchColor,
    pub visited: bool,
    /// Accumulated path length from the origin along the traversal.
    pub cum_dist: f32,
    /// Path length over straight-line distance (distance factor metric).
    pub dfm: f32,
}

impl SearchState {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

/// One foreground voxel.
#[derive(Clone, Debug)]
pub struct VoxelNode {
    pub position: Position,
    /// Symmetric adjacency; kept ordered so traversals are deterministic.
    pub adjacent: BTreeSet<NodeId>,
    pub search: SearchState,
    /// Distance from edge, fixed-point.
    pub dfe: u16,
    /// Distance from centerline, fixed-point.
    pub dfc: u16,
    /// Modified distance from edge used for source selection.
    pub mdfe: f32,
    pub enhance: u16,
    pub weight: f32,
    pub is_bifurcation: bool,
    pub is_centerline: bool,
    /// Centerline this voxel belongs to, if any.
    pub centerline: Option<CenterlineId>,
    /// Nearest centerline node after belonging assignment.
    pub closest_centerline: Option<NodeId>,
}

impl VoxelNode {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            adjacent: BTreeSet::new(),
            search: SearchState::default(),
            dfe: 0,
            dfc: 0,
            mdfe: 0.0,
            enhance: 0,
            weight: 0.0,
            is_bifurcation: false,
            is_centerline: false,
            centerline: None,
            closest_centerline: None,
        }
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }
}
