use super::TimingBreakdown;
use crate::clusters::{Cluster, Label};
use crate::graph::VoxelGraph;
use crate::region_grow::GrowthResult;
use crate::types::{Dims, Position, Resolution};
use serde::Serialize;

/// Result summary produced by [`SegmentationPipeline`](crate::pipeline::SegmentationPipeline).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_grow: Option<GrowStage>,
    pub clusters: ClusterStage,
    pub graphs: Vec<GraphSummary>,
}

impl SegmentationReport {
    pub fn total_graph_nodes(&self) -> usize {
        self.graphs.iter().map(|g| g.nodes).sum()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub resolution: Resolution,
    pub foreground_voxels: usize,
}

impl InputDescriptor {
    pub fn new(dims: Dims, resolution: Resolution, foreground_voxels: usize) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            resolution,
            foreground_voxels,
        }
    }
}

/// Seeded region growing outcome.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowStage {
    pub clusters: usize,
    pub pruned_clusters: usize,
    pub voxels: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_range: Option<(u16, u16)>,
}

impl GrowStage {
    pub fn from_result(result: &GrowthResult, pruned_clusters: usize) -> Self {
        Self {
            clusters: result.clusters.len(),
            pruned_clusters,
            voxels: result.voxel_count(),
            intensity_range: result.intensity_range,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub label: Label,
    pub size: usize,
}

impl From<&Cluster> for ClusterSummary {
    fn from(c: &Cluster) -> Self {
        Self {
            label: c.label,
            size: c.size,
        }
    }
}

/// 3-D labelling and pruning outcome. `kept` is ordered by ascending size.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStage {
    pub labelled: usize,
    pub removed_by_percentile: usize,
    pub removed_by_size: usize,
    pub kept: Vec<ClusterSummary>,
}

/// One connected voxel graph and its selected source node.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub index: usize,
    pub nodes: usize,
    pub edges: usize,
    pub max_z: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dfe: Option<u16>,
}

impl GraphSummary {
    pub fn from_graph(index: usize, graph: &VoxelGraph) -> Self {
        let degree_sum: usize = graph.nodes().iter().map(|n| n.adjacent.len()).sum();
        let source = graph.source();
        Self {
            index,
            nodes: graph.len(),
            edges: degree_sum / 2,
            max_z: graph.max_z(),
            source: source.map(|id| graph.position(id)),
            source_dfe: source.map(|id| graph.node(id).dfe),
        }
    }
}
