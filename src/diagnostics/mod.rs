//! Serializable run summaries for the segmentation pipeline and tools.
//!
//! `SegmentationReport` is the main entry point: it bundles a description of
//! the input, per-stage timings and compact summaries of the clusters and
//! voxel graphs the pipeline produced. Heavy data (volumes, graphs) is never
//! serialized.

pub mod report;
pub mod timing;

pub use report::{
    ClusterStage, ClusterSummary, GraphSummary, GrowStage, InputDescriptor, SegmentationReport,
};
pub use timing::{StageTiming, TimingBreakdown};
