use serde::Serialize;
use std::env;
use std::path::Path;
use vessel_graph::config::segment;
use vessel_graph::diagnostics::SegmentationReport;
use vessel_graph::pipeline::SegmentationPipeline;
use vessel_graph::volume::io::{load_raw_u16, save_mip_png, write_json_file};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = segment::load_config(Path::new(&config_path))?;

    let volume = load_raw_u16(&config.input, config.dims, config.little_endian)
        .map_err(|e| format!("Failed to load volume {}: {e}", config.input.display()))?;
    let pipeline = SegmentationPipeline::new(config.pipeline_params()).map_err(|e| e.to_string())?;
    let output = pipeline.run(volume);

    let summary = SegmentToolReport {
        config: config_path.clone(),
        report: &output.report,
    };
    write_json_file(&config.output.report_json, &summary).map_err(|e| e.to_string())?;
    println!(
        "Saved report for {} graphs ({} nodes) to {}",
        output.report.graphs.len(),
        output.report.total_graph_nodes(),
        config.output.report_json.display()
    );

    if let Some(mip_path) = &config.output.mip_png {
        save_mip_png(&output.volume, mip_path).map_err(|e| e.to_string())?;
        println!("Saved maximum-intensity projection to {}", mip_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: vessel_segment <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SegmentToolReport<'a> {
    config: String,
    report: &'a SegmentationReport,
}
