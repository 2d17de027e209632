//! Centerline tree model.
//!
//! A skeletonizer outside this crate flags a subset of [`VoxelGraph`] nodes
//! as centerline nodes and picks a source. This module organises those nodes:
//!
//! - [`Centerline`]: one ordered branch, with summary statistics.
//! - [`CenterlineGraph`]: the tree (source, leaves, branches, detected cycles).
//! - [`CenterlineNodeData`]: voxels assigned to each centerline node by
//!   nearest resolution-weighted distance.
//! - [`path_bfs`]: hop-shortest path restricted to centerline nodes.
//!
//! Branches are addressed by [`CenterlineId`], an index local to the owning
//! [`CenterlineGraph`]; voxel nodes keep that id as their back-reference.
//!
//! [`VoxelGraph`]: crate::graph::VoxelGraph

mod line;
mod node_data;
pub(crate) mod path;
mod tree;

pub use line::{Centerline, CenterlineStats};
pub use node_data::{assign_closest_belong_nodes, CenterlineNodeData};
pub use path::path_bfs;
pub use tree::CenterlineGraph;

use serde::{Deserialize, Serialize};

/// Index of a [`Centerline`] inside its [`CenterlineGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CenterlineId(pub u32);

impl CenterlineId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests;
