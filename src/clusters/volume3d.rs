use log::debug;

use super::cluster::{Cluster, Label, FIRST_LABEL};
use crate::types::{Dims, Position, NEIGH_26};
use crate::volume::VolumeU16;

/// 26-connected labelling of a 3-D volume.
///
/// The volume is owned so pruning can zero removed voxels in place. Clusters
/// are ranked by ascending size once, at construction; pruning only flags
/// clusters as removed, which makes every threshold call idempotent.
#[derive(Clone, Debug)]
pub struct Clusters3D {
    volume: VolumeU16,
    labels: Vec<Label>,
    ranked: Vec<Cluster>,
    removed: Vec<bool>,
}

impl Clusters3D {
    /// Label every foreground voxel (intensity > 0) of `volume`.
    pub fn new(volume: VolumeU16) -> Self {
        let dims = volume.dims();
        let mut labels = vec![0 as Label; dims.len()];
        let mut ranked = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut next = FIRST_LABEL;

        for start in 0..dims.len() {
            if volume.data[start] == 0 || labels[start] != 0 {
                continue;
            }
            let mut cluster = Cluster::new(next);
            labels[start] = next;
            stack.push(start);
            while let Some(idx) = stack.pop() {
                cluster.count();
                let p = dims.position_of(idx);
                for (dx, dy, dz) in NEIGH_26 {
                    let Some(nidx) = dims.index_of(&p.offset(dx, dy, dz)) else {
                        continue;
                    };
                    if volume.data[nidx] > 0 && labels[nidx] == 0 {
                        labels[nidx] = next;
                        stack.push(nidx);
                    }
                }
            }
            ranked.push(cluster);
            next += 1;
        }
        ranked.sort_by(Cluster::cmp_size);
        debug!(
            "Clusters3D: {} clusters over {}x{}x{}",
            ranked.len(),
            dims.width,
            dims.height,
            dims.depth
        );
        let removed = vec![false; ranked.len()];
        Self {
            volume,
            labels,
            ranked,
            removed,
        }
    }

    pub fn dims(&self) -> Dims {
        self.volume.dims()
    }

    /// Surviving clusters, smallest first.
    pub fn clusters(&self) -> Vec<&Cluster> {
        self.ranked
            .iter()
            .zip(&self.removed)
            .filter(|(_, gone)| !**gone)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.removed.iter().filter(|&&gone| !gone).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label grid in volume order; `0` is background or pruned.
    pub fn label_volume(&self) -> &[Label] {
        &self.labels
    }

    pub fn label_at(&self, p: &Position) -> Option<Label> {
        self.volume.dims().index_of(p).map(|i| self.labels[i])
    }

    pub fn volume(&self) -> &VolumeU16 {
        &self.volume
    }

    pub fn into_volume(self) -> VolumeU16 {
        self.volume
    }

    /// Remove the smallest `floor(n * percentile)` clusters, where `n` is the
    /// number of clusters found at labelling time. Returns how many clusters
    /// were newly removed.
    pub fn threshold_percentile(&mut self, percentile: f32) -> usize {
        let p = if percentile.is_finite() {
            percentile.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cut = (self.ranked.len() as f32 * p).floor() as usize;
        let picked: Vec<usize> = (0..cut).filter(|&i| !self.removed[i]).collect();
        debug!(
            "Clusters3D::threshold_percentile p={:.3} cut={} newly removed={}",
            p,
            cut,
            picked.len()
        );
        self.erase(&picked)
    }

    /// Remove every cluster strictly smaller than `min_size` voxels.
    pub fn threshold_min_size(&mut self, min_size: usize) -> usize {
        let picked: Vec<usize> = (0..self.ranked.len())
            .filter(|&i| !self.removed[i] && self.ranked[i].size < min_size)
            .collect();
        debug!(
            "Clusters3D::threshold_min_size min={} newly removed={}",
            min_size,
            picked.len()
        );
        self.erase(&picked)
    }

    fn erase(&mut self, picked: &[usize]) -> usize {
        if picked.is_empty() {
            return 0;
        }
        let max_label = self.ranked.iter().map(|c| c.label).max().unwrap_or(0) as usize;
        let mut drop = vec![false; max_label + 1];
        for &i in picked {
            self.removed[i] = true;
            drop[self.ranked[i].label as usize] = true;
        }
        for (label, value) in self.labels.iter_mut().zip(self.volume.data.iter_mut()) {
            if *label != 0 && drop[*label as usize] {
                *label = 0;
                *value = 0;
            }
        }
        picked.len()
    }
}
