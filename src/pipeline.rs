//! End-to-end segmentation of a 16-bit vascular volume into voxel graphs.
//!
//! Stages
//! - Region growing (optional): keep voxels connected to seeds inside the
//!   seed window and within the growth window; drop small grown clusters.
//! - Labelling: 26-connected components of the remaining foreground, pruned
//!   by percentile and by minimum size.
//! - Distance from edge: ray-cast DFE map of the pruned volume.
//! - Graph construction: one [`VoxelGraph`] per connected component of the
//!   DFE map, so node `dfe`/`mdfe` hold real distances.
//! - Source selection: best source node per graph, run across graphs in
//!   parallel.
//!
//! Typical usage:
//! ```no_run
//! use vessel_graph::pipeline::{PipelineParams, SegmentationPipeline};
//! use vessel_graph::types::Dims;
//! use vessel_graph::volume::VolumeU16;
//!
//! # fn main() -> vessel_graph::error::Result<()> {
//! let volume = VolumeU16::new(Dims::new(64, 64, 32));
//! let pipeline = SegmentationPipeline::new(PipelineParams::default())?;
//! let output = pipeline.run(volume);
//! println!("graphs={}", output.report.graphs.len());
//! # Ok(())
//! # }
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::clusters::{ClusterOptions, Clusters3D};
use crate::dfe::{DfeOptions, DistanceFromEdge};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    ClusterStage, ClusterSummary, GraphSummary, GrowStage, InputDescriptor, SegmentationReport,
    TimingBreakdown,
};
use crate::distance::VoxelDistance;
use crate::error::Result;
use crate::graph::{connected_graphs, find_best_source_nodes, GraphBuildOptions, VoxelGraph};
use crate::region_grow::{GrowthResult, RegionGrowOptions, RegionGrower};
use crate::types::Resolution;
use crate::volume::{VolumeU16, VolumeView};

/// Parameters for every pipeline stage. Missing groups fall back to defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub resolution: Resolution,
    /// Region growing is skipped when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_grow: Option<RegionGrowOptions>,
    pub clusters: ClusterOptions,
    pub dfe: DfeOptions,
    pub graph: GraphBuildOptions,
}

/// Everything a run produces.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub report: SegmentationReport,
    /// Pruned intensity volume.
    pub volume: VolumeU16,
    /// Distance-from-edge map of `volume`; the graphs were built from it.
    pub dfe_map: VolumeU16,
    /// Connected voxel graphs, largest first, with sources selected.
    pub graphs: Vec<VoxelGraph>,
}

pub struct SegmentationPipeline {
    params: PipelineParams,
    distance: VoxelDistance,
    dfe: DistanceFromEdge,
}

impl SegmentationPipeline {
    /// Fails when the voxel resolution is not positive and finite.
    pub fn new(params: PipelineParams) -> Result<Self> {
        let distance = VoxelDistance::new(params.resolution)?;
        let dfe = DistanceFromEdge::new(&distance, params.dfe);
        Ok(Self {
            params,
            distance,
            dfe,
        })
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn distance(&self) -> &VoxelDistance {
        &self.distance
    }

    pub fn run(&self, volume: VolumeU16) -> PipelineOutput {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let input = InputDescriptor::new(
            volume.dims(),
            self.params.resolution,
            volume.foreground_count(),
        );

        let (volume, region_grow) = match self.params.region_grow {
            Some(options) => {
                let (grown, stage) = timings.time("region_grow", || grow(&volume, options));
                (grown.reconstruction, Some(stage))
            }
            None => (volume, None),
        };

        let (clusters, cluster_stage) =
            timings.time("clusters", || label(volume, &self.params.clusters));
        let volume = clusters.into_volume();

        let dfe_map = timings.time("dfe", || self.dfe.compute(&volume));
        let mut graphs = timings.time("graphs", || connected_graphs(&dfe_map, &self.params.graph));
        let sources = timings.time("sources", || {
            find_best_source_nodes(&mut graphs, &self.distance)
        });
        debug!(
            "SegmentationPipeline: {} graphs, {} with a source",
            graphs.len(),
            sources.iter().filter(|s| s.is_some()).count()
        );

        let summaries = graphs
            .iter()
            .enumerate()
            .map(|(i, g)| GraphSummary::from_graph(i, g))
            .collect();
        timings.total_ms = elapsed_ms(total_start);
        info!(
            "SegmentationPipeline: done in {:.1} ms ({:.1} ms in stages, {} graphs)",
            timings.total_ms,
            timings.stage_sum_ms(),
            graphs.len()
        );

        PipelineOutput {
            report: SegmentationReport {
                input,
                timings,
                region_grow,
                clusters: cluster_stage,
                graphs: summaries,
            },
            volume,
            dfe_map,
            graphs,
        }
    }
}

fn grow(volume: &VolumeU16, options: RegionGrowOptions) -> (GrowthResult, GrowStage) {
    let mut result = RegionGrower::new(volume, options).run();
    let pruned = result.prune_small_clusters(options.size_threshold);
    let stage = GrowStage::from_result(&result, pruned);
    (result, stage)
}

fn label(volume: VolumeU16, options: &ClusterOptions) -> (Clusters3D, ClusterStage) {
    let mut clusters = Clusters3D::new(volume);
    let labelled = clusters.len();
    let removed_by_percentile = if options.below_percentile > 0.0 {
        clusters.threshold_percentile(options.below_percentile)
    } else {
        0
    };
    let removed_by_size = if options.min_size > 0 {
        clusters.threshold_min_size(options.min_size)
    } else {
        0
    };
    let kept = clusters
        .clusters()
        .into_iter()
        .map(ClusterSummary::from)
        .collect();
    let stage = ClusterStage {
        labelled,
        removed_by_percentile,
        removed_by_size,
        kept,
    };
    (clusters, stage)
}
