use super::cluster::{Cluster, Label, FIRST_LABEL};
use crate::types::{Position, NEIGH_8};
use crate::volume::SliceF32;

/// 8-connected labelling of one depth slice, with member positions recorded.
#[derive(Clone, Debug)]
pub struct Clusters2D {
    w: usize,
    h: usize,
    labels: Vec<Label>,
    clusters: Vec<Cluster>,
}

impl Clusters2D {
    /// Label the foreground (value > 0) of `slice`; positions carry `z`.
    pub fn new(slice: &SliceF32, z: i32) -> Self {
        let (w, h) = (slice.w, slice.h);
        let mut labels = vec![0 as Label; w * h];
        let mut clusters = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut next = FIRST_LABEL;

        for y in 0..h {
            for x in 0..w {
                let i = slice.idx(x, y);
                if slice.data[i] <= 0.0 || labels[i] != 0 {
                    continue;
                }
                let mut cluster = Cluster::new(next);
                labels[i] = next;
                stack.push((x, y));
                while let Some((cx, cy)) = stack.pop() {
                    cluster.push(Position::new(cx as i32, cy as i32, z));
                    for (dx, dy) in NEIGH_8 {
                        let nx = cx as isize + dx as isize;
                        let ny = cy as isize + dy as isize;
                        if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                            continue;
                        }
                        let ni = slice.idx(nx as usize, ny as usize);
                        if slice.data[ni] > 0.0 && labels[ni] == 0 {
                            labels[ni] = next;
                            stack.push((nx as usize, ny as usize));
                        }
                    }
                }
                clusters.push(cluster);
                next += 1;
            }
        }
        clusters.sort_by(Cluster::cmp_size);
        Self {
            w,
            h,
            labels,
            clusters,
        }
    }

    /// Clusters, smallest first.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn label_at(&self, x: usize, y: usize) -> Label {
        debug_assert!(x < self.w && y < self.h);
        self.labels[y * self.w + x]
    }

    /// Lowest-weight member of each cluster, largest cluster first.
    pub fn cluster_middles(&self, weights: &SliceF32) -> Vec<Position> {
        let mut order: Vec<&Cluster> = self.clusters.iter().collect();
        order.sort_by(|a, b| Cluster::cmp_size_desc(a, b));
        order
            .into_iter()
            .filter_map(|c| c.middle_position(weights))
            .collect()
    }
}
