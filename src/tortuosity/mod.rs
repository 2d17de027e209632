//! Tortuosity as a distance factor metric (DFM).
//!
//! DFM at a node is the path length travelled from a start node divided by
//! the straight-line distance between them; a straight path scores 1.0 and
//! the start node itself scores 0 by convention. Step lengths use the
//! anisotropic costs of [`VoxelDistance`](crate::distance::VoxelDistance).

mod dfm;
mod measure;

pub use dfm::{centerline_node_at, point_to_point_dfm, DfmFromPoint, DfmRecord, DfmTrace};
pub use measure::LineMeasure;
