use crate::types::{Dims, Position};

/// Voxels claimed by the cluster currently being grown.
pub(crate) struct GrowAccumulator {
    pub indices: Vec<usize>,
    pub low: u16,
    pub high: u16,
}

impl GrowAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            low: u16::MAX,
            high: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.indices.clear();
        self.low = u16::MAX;
        self.high = 0;
    }

    pub(crate) fn push(&mut self, idx: usize, value: u16) {
        self.indices.push(idx);
        self.low = self.low.min(value);
        self.high = self.high.max(value);
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn positions(&self, dims: &Dims) -> Vec<Position> {
        self.indices.iter().map(|&i| dims.position_of(i)).collect()
    }
}
