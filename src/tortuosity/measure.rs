use log::warn;

use crate::distance::{StepKind, VoxelDistance};
use crate::error::{Result, VesselError};
use crate::graph::{NodeId, VoxelGraph};
use crate::types::Position;

/// Physical lengths along voxel paths.
#[derive(Clone, Debug)]
pub struct LineMeasure {
    distance: VoxelDistance,
}

impl LineMeasure {
    pub fn new(distance: VoxelDistance) -> Self {
        Self { distance }
    }

    pub fn distance(&self) -> &VoxelDistance {
        &self.distance
    }

    /// Length of the unit step from `a` to `b`; zero when they coincide.
    ///
    /// Non-neighbours yield [`VesselError::InvalidAdjacency`], logged with the
    /// offending deltas.
    pub fn measure_adjacent(&self, a: &Position, b: &Position) -> Result<f32> {
        if a == b {
            return Ok(0.0);
        }
        match StepKind::classify(a, b) {
            Ok(kind) => Ok(self.distance.step_cost(kind)),
            Err(err) => {
                if let VesselError::InvalidAdjacency { dx, dy, dz } = &err {
                    warn!("not neighbours {a} -> {b}: dx={dx} dy={dy} dz={dz}");
                }
                Err(err)
            }
        }
    }

    /// [`Self::measure_adjacent`] between two graph nodes.
    pub fn measure_centerline(&self, graph: &VoxelGraph, a: NodeId, b: NodeId) -> Result<f32> {
        self.measure_adjacent(&graph.position(a), &graph.position(b))
    }

    /// Resolution-weighted straight-line distance.
    pub fn measure_straight(&self, a: &Position, b: &Position) -> f32 {
        self.distance.distance(a, b) as f32
    }

    /// Sum of step lengths over consecutive pairs; `0.0` below two nodes.
    pub fn measure_line(&self, graph: &VoxelGraph, nodes: &[NodeId]) -> Result<f32> {
        let mut total = 0.0f32;
        for pair in nodes.windows(2) {
            total += self.measure_centerline(graph, pair[0], pair[1])?;
        }
        Ok(total)
    }
}
