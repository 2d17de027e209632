use serde::{Deserialize, Serialize};

/// Intensity windows for seeded region growing. Both windows are inclusive.
///
/// - Seeds: voxels with `seed_lower <= v <= seed_upper` start a cluster.
/// - Growth: a face neighbour joins when `grow_lower <= v <= grow_upper`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionGrowOptions {
    pub seed_lower: u16,
    pub seed_upper: u16,
    pub grow_lower: u16,
    pub grow_upper: u16,
    /// Clusters with fewer voxels are erased by `prune_small_clusters`.
    pub size_threshold: usize,
}

impl Default for RegionGrowOptions {
    fn default() -> Self {
        Self {
            seed_lower: 1250,
            seed_upper: 1400,
            grow_lower: 1100,
            grow_upper: u16::MAX,
            size_threshold: 100,
        }
    }
}

impl RegionGrowOptions {
    #[inline]
    pub fn is_seed(&self, v: u16) -> bool {
        v >= self.seed_lower && v <= self.seed_upper
    }

    #[inline]
    pub fn accepts(&self, v: u16) -> bool {
        v >= self.grow_lower && v <= self.grow_upper
    }
}
