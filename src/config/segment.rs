use crate::clusters::ClusterOptions;
use crate::dfe::DfeOptions;
use crate::graph::GraphBuildOptions;
use crate::pipeline::PipelineParams;
use crate::region_grow::RegionGrowOptions;
use crate::types::{Dims, Resolution};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SegmentToolConfig {
    /// Headerless 16-bit volume, slice-major.
    pub input: PathBuf,
    pub dims: Dims,
    #[serde(default = "default_little_endian")]
    pub little_endian: bool,
    #[serde(default)]
    pub resolution: Resolution,
    /// Region growing is skipped when absent.
    #[serde(default)]
    pub region_grow: Option<RegionGrowOptions>,
    #[serde(default)]
    pub clusters: ClusterOptions,
    #[serde(default)]
    pub dfe: DfeOptions,
    #[serde(default)]
    pub graph: GraphBuildOptions,
    pub output: SegmentOutputConfig,
}

fn default_little_endian() -> bool {
    true
}

impl SegmentToolConfig {
    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            resolution: self.resolution,
            region_grow: self.region_grow,
            clusters: self.clusters,
            dfe: self.dfe,
            graph: self.graph,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SegmentOutputConfig {
    pub report_json: PathBuf,
    /// Maximum-intensity projection of the pruned volume.
    #[serde(default)]
    pub mip_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<SegmentToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<SegmentToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
