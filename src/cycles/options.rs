use serde::{Deserialize, Serialize};

use crate::cycles::DEFAULT_BACKUP_LIMIT;

/// How [`crate::cycles::repair_loop`] breaks a detected loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStrategy {
    /// Bounded backup from the proximal node, gated by the z cut-off.
    #[default]
    ProximalBackup,
    /// Remove the centerline between the bifurcations around the narrow node.
    NarrowShortcut,
}

/// Loop-break policy.
///
/// A loop is broken at its proximal node when that node lies deeper than
/// `depth - floor((1 - cutoff_fraction) * depth)`. The default fraction of 1/3
/// gives `depth - 2 * depth / 3`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopRepairOptions {
    /// Maximum number of centerline nodes unflagged per break.
    pub backup_limit: usize,
    pub cutoff_fraction: f64,
    pub strategy: BreakStrategy,
}

impl Default for LoopRepairOptions {
    fn default() -> Self {
        Self {
            backup_limit: DEFAULT_BACKUP_LIMIT,
            cutoff_fraction: 1.0 / 3.0,
            strategy: BreakStrategy::default(),
        }
    }
}

impl LoopRepairOptions {
    /// Slice index a proximal node must exceed for its loop to be broken.
    pub fn z_cutoff(&self, depth: usize) -> i32 {
        let f = self.cutoff_fraction.clamp(0.0, 1.0);
        let kept = (depth as f64 * (1.0 - f) + 1e-9).floor() as i64;
        (depth as i64 - kept) as i32
    }

    pub fn should_break(&self, proximal_z: i32, depth: usize) -> bool {
        proximal_z > self.z_cutoff(depth)
    }
}
