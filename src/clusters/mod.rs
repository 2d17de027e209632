//! Connected-component labelling of foreground voxels.
//!
//! - [`Clusters3D`]: 26-connected flood fill over a whole volume. Owns the
//!   volume so that size pruning zeroes removed voxels in place.
//! - [`Clusters2D`]: 8-connected flood fill over one slice; records member
//!   positions so a weighted "middle" voxel can be picked per cluster.
//!
//! Both scan voxels in storage order and grow each new cluster with an
//! explicit stack, so labelling is O(foreground voxels) and deterministic.
//! Labels start at [`FIRST_LABEL`]; `0` is background.

mod cluster;
mod options;
mod slice2d;
mod volume3d;

pub use cluster::{Cluster, Label, FIRST_LABEL};
pub use options::ClusterOptions;
pub use slice2d::Clusters2D;
pub use volume3d::Clusters3D;

use crate::volume::VolumeU16;

/// Label `volume` and apply both pruning rules of `options`.
pub fn label_and_prune(volume: VolumeU16, options: &ClusterOptions) -> Clusters3D {
    let mut clusters = Clusters3D::new(volume);
    if options.below_percentile > 0.0 {
        clusters.threshold_percentile(options.below_percentile);
    }
    if options.min_size > 0 {
        clusters.threshold_min_size(options.min_size);
    }
    clusters
}

#[cfg(test)]
mod tests;
