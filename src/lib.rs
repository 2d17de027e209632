#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod volume;

// Algorithm modules
pub mod centerline;
pub mod clusters;
pub mod cycles;
pub mod dfe;
pub mod distance;
pub mod graph;
pub mod region_grow;
pub mod tortuosity;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::error::{Result, VesselError};
pub use crate::pipeline::{PipelineOutput, PipelineParams, SegmentationPipeline};
pub use crate::types::{Dims, Position, Resolution};

// Run summaries returned by the pipeline.
pub use crate::diagnostics::{SegmentationReport, TimingBreakdown};

// Core graph model.
pub use crate::distance::VoxelDistance;
pub use crate::graph::{NodeId, VoxelGraph};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use vessel_graph::prelude::*;
///
/// # fn main() -> vessel_graph::Result<()> {
/// let dims = Dims::new(32, 32, 16);
/// let mut volume = VolumeU16::new(dims);
/// volume.set(4, 4, 4, 1300);
///
/// let pipeline = SegmentationPipeline::new(PipelineParams::default())?;
/// let output = pipeline.run(volume);
/// println!("graphs={} total_ms={:.3}", output.graphs.len(), output.report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::centerline::CenterlineGraph;
    pub use crate::cycles::{repair_loop, LoopRepairOptions};
    pub use crate::tortuosity::{DfmFromPoint, LineMeasure};
    pub use crate::volume::VolumeU16;
    pub use crate::{
        Dims, NodeId, PipelineParams, Position, Resolution, SegmentationPipeline, VoxelDistance,
        VoxelGraph,
    };
}
