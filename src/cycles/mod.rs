//! Loop detection and repair on centerline trees.
//!
//! Search colours follow the usual white/gray/black protocol
//! ([`SearchColor`](crate::graph::SearchColor)). Every search here resets the
//! whole graph's scratch state first.
//!
//! - [`find_cycle`]: BFS around a suspected loop-closing patch.
//! - [`backup_centerline`]: bounded removal of centerline nodes near a break
//!   point; the only capped search in the crate.
//! - [`narrow_bifurcations_path`] / [`erode_narrow`]: the loop's thinnest
//!   point and the centerline shortcut around it.
//! - [`repair_loop`]: detection plus one break strategy under a
//!   [`LoopRepairOptions`] policy.

mod cycle;
mod find;
mod narrow;
mod options;
mod repair;

pub use cycle::CenterlineCycle;
pub use find::find_cycle;
pub use narrow::{
    erode_narrow, narrow_bifurcations, narrow_bifurcations_path, narrow_radius,
    remove_narrow_shortcut,
};
pub use options::{BreakStrategy, LoopRepairOptions};
pub use repair::{
    backup_centerline, contiguous_voxel_set, repair_loop, BackupOutcome, RepairFronts,
    RepairReport,
};

/// Default cap on nodes unflagged by one [`backup_centerline`] call.
pub const DEFAULT_BACKUP_LIMIT: usize = 60;
