use crate::types::{Dims, Position};

/// Read access to a 3-D intensity grid.
pub trait VolumeView {
    fn dims(&self) -> Dims;

    /// Intensity at `(x, y, z)`; coordinates must be in bounds.
    fn get(&self, x: usize, y: usize, z: usize) -> f32;

    #[inline]
    fn at(&self, p: &Position) -> Option<f32> {
        let dims = self.dims();
        dims.contains(p)
            .then(|| self.get(p.x as usize, p.y as usize, p.z as usize))
    }

    #[inline]
    fn is_foreground(&self, p: &Position) -> bool {
        self.at(p).is_some_and(|v| v > 0.0)
    }

    /// Number of voxels with intensity above zero.
    fn foreground_count(&self) -> usize {
        let d = self.dims();
        let mut n = 0;
        for z in 0..d.depth {
            for y in 0..d.height {
                for x in 0..d.width {
                    if self.get(x, y, z) > 0.0 {
                        n += 1;
                    }
                }
            }
        }
        n
    }
}
