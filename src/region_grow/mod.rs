//! Threshold-seeded region growing.
//!
//! Every voxel whose intensity lies in the seed window starts a cluster
//! (unless an earlier cluster already claimed it). Growth proceeds over
//! 6-connected face neighbours with a FIFO queue and accepts a neighbour when
//! it is in bounds, unclaimed, and inside the growth window. Accepted voxels
//! are copied into a reconstruction volume and recorded on their cluster, so
//! size pruning is a pass over the recorded clusters rather than a re-scan.

mod accumulator;
mod grower;
mod options;

pub use grower::{GrowthResult, RegionGrower};
pub use options::RegionGrowOptions;

use crate::volume::VolumeU16;

/// Grow all seeds of `source` and prune clusters below `options.size_threshold`.
pub fn grow_regions(source: &VolumeU16, options: RegionGrowOptions) -> GrowthResult {
    let mut result = RegionGrower::new(source, options).run();
    result.prune_small_clusters(options.size_threshold);
    result
}

#[cfg(test)]
mod tests;
