//! Anisotropic step costs on a 3-D voxel grid.
//!
//! A unit move between two 26-connected voxels changes one, two or three axes
//! at once. The physical length of each of the seven move patterns is the
//! Euclidean norm of the contributing voxel spacings. Costs are kept both as
//! `f32` and as fixed-point `u16` values (`round(cost * DISTANCE_PRECISION)`),
//! the compact form stored per voxel for distance-from-edge style maps.
//!
//! Straight-line distances between arbitrary (non-adjacent) voxels go through
//! [`VoxelDistance::distance`], which scales each axis by its resolution.

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VesselError};
use crate::types::{Position, Resolution};

/// Scale applied before rounding physical distances into `u16`.
pub const DISTANCE_PRECISION: f32 = 100.0;

/// Round a physical distance into fixed-point units, saturating at `u16::MAX`.
#[inline]
pub fn to_fixed(value: f32) -> u16 {
    (value * DISTANCE_PRECISION)
        .round()
        .clamp(0.0, u16::MAX as f32) as u16
}

#[inline]
pub fn from_fixed(value: u16) -> f32 {
    value as f32 / DISTANCE_PRECISION
}

/// The seven unit-step adjacency patterns of a 26-connected grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    X,
    Y,
    Z,
    XY,
    XZ,
    YZ,
    XYZ,
}

impl StepKind {
    pub const ALL: [StepKind; 7] = [
        StepKind::X,
        StepKind::Y,
        StepKind::Z,
        StepKind::XY,
        StepKind::XZ,
        StepKind::YZ,
        StepKind::XYZ,
    ];

    /// Determine the move pattern joining `a` and `b` from the absolute
    /// per-axis deltas. Any delta above one, or two identical positions, is
    /// [`VesselError::InvalidAdjacency`].
    pub fn classify(a: &Position, b: &Position) -> Result<StepKind> {
        let [dx, dy, dz] = a.abs_delta(b);
        match (dx, dy, dz) {
            (1, 0, 0) => Ok(StepKind::X),
            (0, 1, 0) => Ok(StepKind::Y),
            (0, 0, 1) => Ok(StepKind::Z),
            (1, 1, 0) => Ok(StepKind::XY),
            (1, 0, 1) => Ok(StepKind::XZ),
            (0, 1, 1) => Ok(StepKind::YZ),
            (1, 1, 1) => Ok(StepKind::XYZ),
            _ => Err(VesselError::InvalidAdjacency { dx, dy, dz }),
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Precomputed physical step costs for one voxel spacing.
#[derive(Clone, Debug)]
pub struct VoxelDistance {
    resolution: Resolution,
    costs: [f32; 7],
    fixed: [u16; 7],
}

impl VoxelDistance {
    pub fn new(resolution: Resolution) -> Result<Self> {
        resolution.validate()?;
        let (x, y, z) = (
            resolution.x as f64,
            resolution.y as f64,
            resolution.z as f64,
        );
        let mut costs = [0.0f32; 7];
        for kind in StepKind::ALL {
            let sq = match kind {
                StepKind::X => x * x,
                StepKind::Y => y * y,
                StepKind::Z => z * z,
                StepKind::XY => x * x + y * y,
                StepKind::XZ => x * x + z * z,
                StepKind::YZ => y * y + z * z,
                StepKind::XYZ => x * x + y * y + z * z,
            };
            costs[kind.slot()] = sq.sqrt() as f32;
        }
        let fixed = costs.map(to_fixed);
        debug!(
            "VoxelDistance: res=({:.3}, {:.3}, {:.3}) fixed x={} y={} z={} xy={} xz={} yz={} xyz={}",
            resolution.x,
            resolution.y,
            resolution.z,
            fixed[0],
            fixed[1],
            fixed[2],
            fixed[3],
            fixed[4],
            fixed[5],
            fixed[6]
        );
        Ok(Self {
            resolution,
            costs,
            fixed,
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn max_resolution(&self) -> f32 {
        self.resolution.max()
    }

    #[inline]
    pub fn step_cost(&self, kind: StepKind) -> f32 {
        self.costs[kind.slot()]
    }

    #[inline]
    pub fn fixed_step_cost(&self, kind: StepKind) -> u16 {
        self.fixed[kind.slot()]
    }

    /// Cost of the unit move from `a` to `b`.
    pub fn step_between(&self, a: &Position, b: &Position) -> Result<f32> {
        StepKind::classify(a, b).map(|kind| self.step_cost(kind))
    }

    /// Resolution-weighted Euclidean distance between two voxels.
    pub fn distance(&self, a: &Position, b: &Position) -> f64 {
        (a.to_vector() - b.to_vector())
            .component_mul(&self.resolution.as_vector())
            .norm()
    }

    /// Resolution-weighted distance from a voxel to a point given in voxel units.
    pub fn distance_to_point(&self, a: &Position, point: &Vector3<f64>) -> f64 {
        (a.to_vector() - point)
            .component_mul(&self.resolution.as_vector())
            .norm()
    }
}
