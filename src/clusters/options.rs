use serde::{Deserialize, Serialize};

/// Pruning applied after 3-D labelling.
///
/// - `below_percentile`: drop the smallest `floor(n * p)` clusters, `0.0` keeps all.
/// - `min_size`: drop clusters with fewer voxels, `0` keeps all.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    pub below_percentile: f32,
    pub min_size: usize,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            below_percentile: 0.0,
            min_size: 100,
        }
    }
}
