use log::debug;
use std::collections::VecDeque;

use super::accumulator::GrowAccumulator;
use super::options::RegionGrowOptions;
use crate::clusters::{Cluster, Label};
use crate::types::{Position, NEIGH_6};
use crate::volume::VolumeU16;

/// Output of a region-growing run.
#[derive(Clone, Debug)]
pub struct GrowthResult {
    /// Grown voxels at their source intensity, zero elsewhere.
    pub reconstruction: VolumeU16,
    pub clusters: Vec<Cluster>,
    /// Lowest and highest accepted intensity; `None` when nothing was grown.
    pub intensity_range: Option<(u16, u16)>,
}

impl GrowthResult {
    /// Erase every cluster with fewer than `size_threshold` members from the
    /// reconstruction and drop it from the list. Returns clusters removed.
    pub fn prune_small_clusters(&mut self, size_threshold: usize) -> usize {
        let before = self.clusters.len();
        let reconstruction = &mut self.reconstruction;
        self.clusters.retain(|c| {
            if c.size >= size_threshold {
                return true;
            }
            for p in &c.positions {
                reconstruction.set_at(p, 0);
            }
            false
        });
        let removed = before - self.clusters.len();
        debug!(
            "GrowthResult::prune_small_clusters threshold={} removed={} kept={}",
            size_threshold,
            removed,
            self.clusters.len()
        );
        removed
    }

    pub fn voxel_count(&self) -> usize {
        self.clusters.iter().map(|c| c.size).sum()
    }
}

/// Seeded, window-gated flood fill over face neighbours.
///
/// The claimed grid is owned by the grower for the whole run; every voxel
/// joins at most one cluster.
pub struct RegionGrower<'a> {
    source: &'a VolumeU16,
    options: RegionGrowOptions,
    claimed: Vec<bool>,
    reconstruction: VolumeU16,
    queue: VecDeque<usize>,
    region: GrowAccumulator,
    clusters: Vec<Cluster>,
    low: u16,
    high: u16,
    next_label: Label,
}

impl<'a> RegionGrower<'a> {
    pub fn new(source: &'a VolumeU16, options: RegionGrowOptions) -> Self {
        let dims = source.dims();
        Self {
            source,
            options,
            claimed: vec![false; dims.len()],
            reconstruction: VolumeU16::new(dims),
            queue: VecDeque::new(),
            region: GrowAccumulator::with_capacity(1024),
            clusters: Vec::new(),
            low: u16::MAX,
            high: 0,
            next_label: 1,
        }
    }

    pub fn is_claimed(&self, p: &Position) -> bool {
        self.source
            .dims()
            .index_of(p)
            .is_some_and(|i| self.claimed[i])
    }

    /// Grow one cluster from `seed`. Returns the number of voxels claimed,
    /// zero when the seed is out of bounds or already claimed.
    pub fn grow_from(&mut self, seed: Position) -> usize {
        let dims = self.source.dims();
        let Some(seed_idx) = dims.index_of(&seed) else {
            return 0;
        };
        if self.claimed[seed_idx] {
            return 0;
        }
        self.region.reset();
        self.queue.clear();
        self.claim(seed_idx);
        self.queue.push_back(seed_idx);

        while let Some(idx) = self.queue.pop_front() {
            let p = dims.position_of(idx);
            for (dx, dy, dz) in NEIGH_6 {
                let Some(nidx) = dims.index_of(&p.offset(dx, dy, dz)) else {
                    continue;
                };
                if !self.claimed[nidx] && self.options.accepts(self.source.data[nidx]) {
                    self.claim(nidx);
                    self.queue.push_back(nidx);
                }
            }
        }

        let mut cluster = Cluster::new(self.next_label);
        self.next_label += 1;
        cluster.size = self.region.len();
        cluster.positions = self.region.positions(&dims);
        if !self.region.is_empty() {
            self.low = self.low.min(self.region.low);
            self.high = self.high.max(self.region.high);
        }
        let grown = cluster.size;
        self.clusters.push(cluster);
        grown
    }

    fn claim(&mut self, idx: usize) {
        let v = self.source.data[idx];
        self.claimed[idx] = true;
        self.reconstruction.data[idx] = v;
        self.region.push(idx, v);
    }

    /// Grow from every seed voxel (z, row, column order) and finish.
    pub fn run(mut self) -> GrowthResult {
        let dims = self.source.dims();
        for idx in 0..dims.len() {
            if self.options.is_seed(self.source.data[idx]) && !self.claimed[idx] {
                self.grow_from(dims.position_of(idx));
            }
        }
        self.finish()
    }

    pub fn finish(self) -> GrowthResult {
        let intensity_range = (self.low <= self.high).then_some((self.low, self.high));
        debug!(
            "RegionGrower: {} clusters, {} voxels, range={:?}",
            self.clusters.len(),
            self.clusters.iter().map(|c| c.size).sum::<usize>(),
            intensity_range
        );
        GrowthResult {
            reconstruction: self.reconstruction,
            clusters: self.clusters,
            intensity_range,
        }
    }
}
