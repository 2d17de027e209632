//! Owned 16-bit volume, the native container for segmentation masks,
//! label-free intensity stacks and region-growing reconstructions.
use crate::error::{Result, VesselError};
use crate::types::{Dims, Position};

#[derive(Clone, Debug, PartialEq)]
pub struct VolumeU16 {
    dims: Dims,
    /// Backing storage, slice-major
    pub data: Vec<u16>,
}

impl VolumeU16 {
    /// Zero-initialised volume.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            data: vec![0; dims.len()],
        }
    }

    /// Wrap an existing buffer; its length must equal `dims.len()`.
    pub fn from_vec(dims: Dims, data: Vec<u16>) -> Result<Self> {
        if data.len() != dims.len() {
            return Err(VesselError::DimensionMismatch {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u16 {
        self.data[self.dims.index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: u16) {
        let i = self.dims.index(x, y, z);
        self.data[i] = v;
    }

    #[inline]
    pub fn get_at(&self, p: &Position) -> Option<u16> {
        self.dims.index_of(p).map(|i| self.data[i])
    }

    /// Writes `v` at `p`; returns false when `p` is outside the volume.
    #[inline]
    pub fn set_at(&mut self, p: &Position, v: u16) -> bool {
        match self.dims.index_of(p) {
            Some(i) => {
                self.data[i] = v;
                true
            }
            None => false,
        }
    }

    /// Row slice `y` of depth slice `z`.
    pub fn row(&self, y: usize, z: usize) -> &[u16] {
        let start = self.dims.index(0, y, z);
        &self.data[start..start + self.dims.width]
    }

    pub fn max_value(&self) -> u16 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

impl crate::volume::traits::VolumeView for VolumeU16 {
    #[inline]
    fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.dims.index(x, y, z)] as f32
    }
}
