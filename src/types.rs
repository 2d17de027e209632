use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VesselError;

/// Integer voxel coordinate: column (`x`), row (`y`) and depth slice (`z`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Absolute per-axis step counts between two positions.
    #[inline]
    pub fn abs_delta(&self, other: &Position) -> [u32; 3] {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Coordinates in voxel units.
    #[inline]
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Face neighbours on a 3-D grid.
pub const NEIGH_6: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Face and corner neighbours inside one 2-D slice.
pub const NEIGH_8: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Every combination of {-1, 0, 1} per axis except the zero vector.
pub const NEIGH_26: [(i32, i32, i32); 26] = neighbour_offsets_26();

const fn neighbour_offsets_26() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

/// Volume shape in voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Dims {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height * self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index, slice-major: `z * width * height + y * width + x`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    #[inline]
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as usize) < self.width
            && (p.y as usize) < self.height
            && (p.z as usize) < self.depth
    }

    /// Linear index of an in-bounds position, `None` outside the grid.
    #[inline]
    pub fn index_of(&self, p: &Position) -> Option<usize> {
        self.contains(p)
            .then(|| self.index(p.x as usize, p.y as usize, p.z as usize))
    }

    #[inline]
    pub fn position_of(&self, idx: usize) -> Position {
        let plane = self.width * self.height;
        let z = idx / plane;
        let rem = idx % plane;
        Position::new((rem % self.width) as i32, (rem / self.width) as i32, z as i32)
    }

    /// True when the position touches the outermost voxel layer.
    #[inline]
    pub fn on_border(&self, p: &Position) -> bool {
        p.x == 0
            || p.y == 0
            || p.z == 0
            || p.x as usize + 1 >= self.width
            || p.y as usize + 1 >= self.height
            || p.z as usize + 1 >= self.depth
    }

    /// Geometric centre rounded to whole voxels.
    pub fn center(&self) -> Vector3<f64> {
        Vector3::new(
            (self.width as f64 / 2.0).round(),
            (self.height as f64 / 2.0).round(),
            (self.depth as f64 / 2.0).round(),
        )
    }
}

/// Physical size of one voxel step along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

impl Resolution {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn validate(&self) -> Result<(), VesselError> {
        let ok = [self.x, self.y, self.z]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if ok {
            Ok(())
        } else {
            Err(VesselError::InvalidResolution {
                x: self.x,
                y: self.y,
                z: self.z,
            })
        }
    }

    #[inline]
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    pub fn max(&self) -> f32 {
        self.x.max(self.y).max(self.z)
    }
}
