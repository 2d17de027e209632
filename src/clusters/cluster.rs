use serde::Serialize;
use std::cmp::Ordering;

use crate::types::Position;
use crate::volume::SliceF32;

/// Cluster label. `0` is background.
pub type Label = u32;

/// First label handed out by the flood-fill labelers.
pub const FIRST_LABEL: Label = 2;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cluster {
    pub label: Label,
    /// Member voxel count.
    pub size: usize,
    /// Member positions; only filled by labelers that record them.
    #[serde(skip)]
    pub positions: Vec<Position>,
}

impl Cluster {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            size: 0,
            positions: Vec::new(),
        }
    }

    #[inline]
    pub fn count(&mut self) {
        self.size += 1;
    }

    #[inline]
    pub fn push(&mut self, p: Position) {
        self.size += 1;
        self.positions.push(p);
    }

    /// Smaller clusters first.
    pub fn cmp_size(a: &Cluster, b: &Cluster) -> Ordering {
        a.size.cmp(&b.size)
    }

    /// Larger clusters first.
    pub fn cmp_size_desc(a: &Cluster, b: &Cluster) -> Ordering {
        b.size.cmp(&a.size)
    }

    /// Recorded member with the lowest value in `weights` (first on ties).
    pub fn middle_position(&self, weights: &SliceF32) -> Option<Position> {
        let mut best: Option<(Position, f32)> = None;
        for p in &self.positions {
            let w = weights.get(p.x as usize, p.y as usize);
            if best.map_or(true, |(_, bw)| w < bw) {
                best = Some((*p, w));
            }
        }
        best.map(|(p, _)| p)
    }
}
