//! Owned single-channel f32 slice in row-major layout.
//!
//! Used for per-slice weight or cost maps, e.g. the 2-D clustering that picks
//! distal start points from the bottom slice of a stack.
#[derive(Clone, Debug)]
pub struct SliceF32 {
    /// Slice width in voxels
    pub w: usize,
    /// Slice height in voxels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl SliceF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Take one depth slice of a volume as floats.
    pub fn from_volume<V: crate::volume::VolumeView>(volume: &V, z: usize) -> Self {
        let dims = volume.dims();
        let mut out = Self::new(dims.width, dims.height);
        for y in 0..dims.height {
            for x in 0..dims.width {
                out.set(x, y, volume.get(x, y, z));
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
