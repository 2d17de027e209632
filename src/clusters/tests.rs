use super::*;
use crate::types::{Dims, Position};
use crate::volume::{SliceF32, VolumeU16};

/// Two disjoint blobs: a 5-voxel row and a 12-voxel 3x2x2 block.
fn two_blobs() -> VolumeU16 {
    let mut vol = VolumeU16::new(Dims::new(12, 6, 4));
    for x in 0..5 {
        vol.set(x, 0, 0, 10);
    }
    for z in 1..3 {
        for y in 3..5 {
            for x in 6..9 {
                vol.set(x, y, z, 20);
            }
        }
    }
    vol
}

#[test]
fn two_blobs_give_two_ascending_clusters() {
    let clusters = Clusters3D::new(two_blobs());
    let sizes: Vec<usize> = clusters.clusters().iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![5, 12]);
    let labels: Vec<Label> = clusters.clusters().iter().map(|c| c.label).collect();
    assert!(labels.iter().all(|&l| l >= FIRST_LABEL), "labels {labels:?}");
    assert_eq!(clusters.label_at(&Position::new(0, 0, 0)), Some(FIRST_LABEL));
    assert_eq!(clusters.label_at(&Position::new(11, 5, 3)), Some(0));
}

#[test]
fn min_size_removes_small_blob_only() {
    let mut clusters = Clusters3D::new(two_blobs());
    assert_eq!(clusters.threshold_min_size(10), 1);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters.clusters()[0].size, 12);

    let vol = clusters.volume();
    for x in 0..5 {
        assert_eq!(vol.get(x, 0, 0), 0, "small blob voxel {x} survived");
    }
    assert_eq!(vol.get(7, 4, 2), 20);
    assert_eq!(clusters.label_at(&Position::new(2, 0, 0)), Some(0));
    assert_eq!(vol.data.iter().filter(|&&v| v > 0).count(), 12);
}

#[test]
fn thresholds_are_idempotent() {
    let mut clusters = Clusters3D::new(two_blobs());
    clusters.threshold_min_size(10);
    let snapshot = clusters.volume().clone();
    assert_eq!(clusters.threshold_min_size(10), 0);
    assert_eq!(clusters.volume(), &snapshot);

    assert_eq!(clusters.threshold_percentile(0.5), 0);
    assert_eq!(clusters.volume(), &snapshot);
}

#[test]
fn percentile_cut_uses_floor() {
    let mut clusters = Clusters3D::new(two_blobs());
    assert_eq!(clusters.threshold_percentile(0.49), 0);
    assert_eq!(clusters.threshold_percentile(0.5), 1);
    assert_eq!(clusters.clusters()[0].size, 12);
    assert_eq!(clusters.threshold_percentile(0.5), 0);
}

#[test]
fn diagonal_voxels_join_one_cluster() {
    let mut vol = VolumeU16::new(Dims::new(3, 3, 3));
    vol.set(0, 0, 0, 1);
    vol.set(1, 1, 1, 1);
    vol.set(2, 2, 2, 1);
    let clusters = Clusters3D::new(vol);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters.clusters()[0].size, 3);
}

#[test]
fn label_and_prune_applies_options() {
    let opts = ClusterOptions {
        below_percentile: 0.0,
        min_size: 6,
    };
    let clusters = label_and_prune(two_blobs(), &opts);
    assert_eq!(clusters.len(), 1);
}

#[test]
fn slice_clusters_record_positions_and_middles() {
    let mut slice = SliceF32::new(8, 4);
    // Blob A: three pixels, diagonal link.
    slice.set(0, 0, 1.0);
    slice.set(1, 1, 1.0);
    slice.set(2, 1, 1.0);
    // Blob B: five pixels in a row.
    for x in 3..8 {
        slice.set(x, 3, 1.0);
    }
    let clusters = Clusters2D::new(&slice, 7);
    let sizes: Vec<usize> = clusters.clusters().iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![3, 5]);
    assert!(clusters
        .clusters()
        .iter()
        .all(|c| c.positions.len() == c.size && c.positions.iter().all(|p| p.z == 7)));
    assert_eq!(clusters.label_at(0, 0), clusters.label_at(2, 1));
    assert_eq!(clusters.label_at(0, 3), 0);

    let mut weights = SliceF32::new(8, 4);
    weights.data.fill(5.0);
    weights.set(1, 1, 0.5);
    weights.set(6, 3, 1.0);
    let middles = clusters.cluster_middles(&weights);
    assert_eq!(middles, vec![Position::new(6, 3, 7), Position::new(1, 1, 7)]);
}

#[test]
fn comparators_order_by_size() {
    let mut a = Cluster::new(2);
    a.count();
    let mut b = Cluster::new(3);
    b.count();
    b.count();
    let mut v = vec![b.clone(), a.clone()];
    v.sort_by(Cluster::cmp_size);
    assert_eq!(v[0].label, 2);
    v.sort_by(Cluster::cmp_size_desc);
    assert_eq!(v[0].label, 3);
}
