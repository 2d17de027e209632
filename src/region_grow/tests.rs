use super::*;
use crate::types::{Dims, Position, NEIGH_6};
use crate::volume::VolumeU16;

fn window(seed: (u16, u16), grow: (u16, u16)) -> RegionGrowOptions {
    RegionGrowOptions {
        seed_lower: seed.0,
        seed_upper: seed.1,
        grow_lower: grow.0,
        grow_upper: grow.1,
        size_threshold: 1,
    }
}

/// Seed at the centre of a 5^3 volume; face neighbours in the growth window,
/// one face neighbour too bright, everything else background.
fn plus_volume() -> (VolumeU16, Position) {
    let mut vol = VolumeU16::new(Dims::new(5, 5, 5));
    let c = Position::new(2, 2, 2);
    vol.set_at(&c, 1300);
    for (dx, dy, dz) in NEIGH_6 {
        vol.set_at(&c.offset(dx, dy, dz), 1150);
    }
    vol.set_at(&c.offset(0, 0, -1), 5000);
    (vol, c)
}

#[test]
fn grows_face_neighbours_inside_window() {
    let (vol, c) = plus_volume();
    let mut grower = RegionGrower::new(&vol, window((1250, 1400), (1100, 2000)));
    assert_eq!(grower.grow_from(c), 6);
    assert!(!grower.is_claimed(&c.offset(0, 0, -1)), "out-of-window voxel claimed");
    assert!(grower.is_claimed(&c.offset(1, 0, 0)));
    let result = grower.finish();
    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.clusters[0].label, 1);
    assert_eq!(result.reconstruction.get_at(&c), Some(1300));
    assert_eq!(result.reconstruction.get_at(&c.offset(0, 1, 0)), Some(1150));
    assert_eq!(result.reconstruction.get_at(&c.offset(0, 0, -1)), Some(0));
    assert_eq!(result.intensity_range, Some((1150, 1300)));
}

#[test]
fn regrowing_claimed_region_claims_nothing() {
    let (vol, c) = plus_volume();
    let mut grower = RegionGrower::new(&vol, window((1250, 1400), (1100, 2000)));
    assert_eq!(grower.grow_from(c), 6);
    assert_eq!(grower.grow_from(c), 0);
    assert_eq!(grower.grow_from(c.offset(1, 0, 0)), 0);
    assert_eq!(grower.grow_from(Position::new(-1, 0, 0)), 0);
}

#[test]
fn diagonal_voxels_are_not_face_neighbours() {
    let mut vol = VolumeU16::new(Dims::new(4, 4, 4));
    vol.set(1, 1, 1, 1300);
    vol.set(2, 2, 1, 1200);
    let result = RegionGrower::new(&vol, window((1250, 1400), (1100, 2000))).run();
    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.clusters[0].size, 1);
}

#[test]
fn each_seed_starts_its_own_cluster() {
    let mut vol = VolumeU16::new(Dims::new(8, 1, 1));
    for x in 0..3 {
        vol.set(x, 0, 0, 1300);
    }
    vol.set(6, 0, 0, 1300);
    let result = RegionGrower::new(&vol, window((1250, 1400), (1100, 2000))).run();
    let sizes: Vec<usize> = result.clusters.iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![3, 1]);
    let labels: Vec<u32> = result.clusters.iter().map(|c| c.label).collect();
    assert_eq!(labels, vec![1, 2]);
}

#[test]
fn prune_erases_small_clusters_from_reconstruction() {
    let mut vol = VolumeU16::new(Dims::new(8, 1, 1));
    for x in 0..3 {
        vol.set(x, 0, 0, 1300);
    }
    vol.set(6, 0, 0, 1300);
    let mut result = RegionGrower::new(&vol, window((1250, 1400), (1100, 2000))).run();
    assert_eq!(result.prune_small_clusters(2), 1);
    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.reconstruction.get(6, 0, 0), 0);
    assert_eq!(result.reconstruction.get(1, 0, 0), 1300);
    assert_eq!(result.voxel_count(), 3);
    assert_eq!(result.prune_small_clusters(2), 0);
}

#[test]
fn grow_regions_uses_size_threshold() {
    let (vol, _) = plus_volume();
    let mut opts = window((1250, 1400), (1100, 2000));
    opts.size_threshold = 10;
    let result = grow_regions(&vol, opts);
    assert!(result.clusters.is_empty());
    assert!(result.reconstruction.data.iter().all(|&v| v == 0));
}

#[test]
fn empty_volume_has_no_range() {
    let vol = VolumeU16::new(Dims::new(2, 2, 2));
    let result = RegionGrower::new(&vol, RegionGrowOptions::default()).run();
    assert!(result.clusters.is_empty());
    assert_eq!(result.intensity_range, None);
}
