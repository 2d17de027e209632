//! Distance-from-edge (DFE) maps.
//!
//! Every foreground voxel casts straight rays along the 26 neighbour
//! directions. A ray sums the fixed-point step cost of each foreground voxel
//! it crosses, the start voxel included, and stops at background or at the
//! volume boundary. The DFE is the shortest ray, so it grows towards the
//! middle of a vessel and is smallest on its wall.
//!
//! Slices within `planar_margin` of either end of the stack only use the 8
//! in-plane directions. Vessels cut by the top or bottom of the volume would
//! otherwise get a low DFE all along their cut face.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::distance::{StepKind, VoxelDistance};
use crate::graph::VoxelGraph;
use crate::types::{Position, NEIGH_26, NEIGH_8};
use crate::volume::{VolumeU16, VolumeView};

pub const DEFAULT_PLANAR_MARGIN: usize = 6;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DfeOptions {
    /// Slices with `z <= planar_margin` or `z > depth - planar_margin` are
    /// measured in-plane.
    pub planar_margin: usize,
}

impl Default for DfeOptions {
    fn default() -> Self {
        Self {
            planar_margin: DEFAULT_PLANAR_MARGIN,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Ray {
    dx: i32,
    dy: i32,
    dz: i32,
    cost: u32,
}

/// Ray-cast DFE with precomputed per-direction step costs.
#[derive(Clone, Debug)]
pub struct DistanceFromEdge {
    volumetric: Vec<Ray>,
    planar: Vec<Ray>,
    planar_margin: usize,
}

impl DistanceFromEdge {
    pub fn new(distance: &VoxelDistance, options: DfeOptions) -> Self {
        let origin = Position::new(0, 0, 0);
        let ray = |(dx, dy, dz): (i32, i32, i32)| {
            StepKind::classify(&origin, &origin.offset(dx, dy, dz))
                .ok()
                .map(|kind| Ray {
                    dx,
                    dy,
                    dz,
                    cost: distance.fixed_step_cost(kind) as u32,
                })
        };
        let volumetric = NEIGH_26.iter().copied().filter_map(ray).collect();
        let planar = NEIGH_8
            .iter()
            .map(|&(dx, dy)| (dx, dy, 0))
            .filter_map(ray)
            .collect();
        Self {
            volumetric,
            planar,
            planar_margin: options.planar_margin,
        }
    }

    pub fn is_planar(&self, z: usize, depth: usize) -> bool {
        z <= self.planar_margin || z + self.planar_margin > depth
    }

    /// DFE of the voxel at `p`; zero for background or out-of-bounds voxels,
    /// at least one for foreground.
    pub fn dfe_at<V: VolumeView>(&self, volume: &V, p: &Position) -> u16 {
        if !volume.is_foreground(p) {
            return 0;
        }
        let rays = if self.is_planar(p.z as usize, volume.dims().depth) {
            &self.planar
        } else {
            &self.volumetric
        };
        let mut best = u32::MAX;
        for ray in rays {
            let mut total = 0u32;
            let mut q = *p;
            while total < best && volume.is_foreground(&q) {
                total += ray.cost;
                q = q.offset(ray.dx, ray.dy, ray.dz);
            }
            best = best.min(total);
        }
        best.clamp(1, u16::MAX as u32) as u16
    }

    /// DFE map of the whole volume, background zero.
    pub fn compute<V: VolumeView>(&self, volume: &V) -> VolumeU16 {
        let dims = volume.dims();
        let mut out = VolumeU16::new(dims);
        for (idx, slot) in out.data.iter_mut().enumerate() {
            *slot = self.dfe_at(volume, &dims.position_of(idx));
        }
        debug!(
            "DistanceFromEdge: {}x{}x{} map, max dfe {}",
            dims.width,
            dims.height,
            dims.depth,
            out.max_value()
        );
        out
    }

    /// Overwrite `dfe` and `mdfe` of every node of `graph` from `volume`.
    pub fn assign<V: VolumeView>(&self, graph: &mut VoxelGraph, volume: &V) {
        let ids: Vec<_> = graph.ids().collect();
        for id in ids {
            let dfe = self.dfe_at(volume, &graph.position(id));
            let node = graph.node_mut(id);
            node.dfe = dfe;
            node.mdfe = dfe as f32;
        }
    }
}
