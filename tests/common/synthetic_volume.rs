use vessel_graph::types::{Dims, Position};
use vessel_graph::volume::VolumeU16;

/// Vertical tube of radius `radius` around column `(cx, cy)` spanning every
/// slice. The axis voxels get `core`, the rest of the disc `wall`.
pub fn add_tube_z(volume: &mut VolumeU16, cx: usize, cy: usize, radius: usize, core: u16, wall: u16) {
    let d = volume.dims();
    let r2 = (radius * radius) as i64;
    for z in 0..d.depth {
        for y in cy.saturating_sub(radius)..=(cy + radius).min(d.height - 1) {
            for x in cx.saturating_sub(radius)..=(cx + radius).min(d.width - 1) {
                let dx = x as i64 - cx as i64;
                let dy = y as i64 - cy as i64;
                let dist2 = dx * dx + dy * dy;
                if dist2 == 0 {
                    volume.set(x, y, z, core);
                } else if dist2 <= r2 {
                    volume.set(x, y, z, wall);
                }
            }
        }
    }
}

/// Axis-aligned box filled with `value`, bounds inclusive.
pub fn add_box(volume: &mut VolumeU16, lo: (usize, usize, usize), hi: (usize, usize, usize), value: u16) {
    for z in lo.2..=hi.2 {
        for y in lo.1..=hi.1 {
            for x in lo.0..=hi.0 {
                volume.set(x, y, z, value);
            }
        }
    }
}

/// Number of voxels in a discrete disc of radius `radius`.
pub fn disc_area(radius: usize) -> usize {
    let r = radius as i64;
    let mut n = 0;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                n += 1;
            }
        }
    }
    n
}

/// One-voxel-thick square outline in slice `z` with the four corners cut,
/// so consecutive voxels are the only 26-neighbours. Listed in walking order
/// starting at `(lo + 1, lo)`.
pub fn square_ring(lo: i32, hi: i32, z: i32) -> Vec<Position> {
    let mut out = Vec::new();
    for x in lo + 1..hi {
        out.push(Position::new(x, lo, z));
    }
    for y in lo + 1..hi {
        out.push(Position::new(hi, y, z));
    }
    for x in (lo + 1..hi).rev() {
        out.push(Position::new(x, hi, z));
    }
    for y in (lo + 1..hi).rev() {
        out.push(Position::new(lo, y, z));
    }
    out
}

pub fn volume_from_positions(dims: Dims, positions: &[Position], value: u16) -> VolumeU16 {
    let mut volume = VolumeU16::new(dims);
    for p in positions {
        volume.set_at(p, value);
    }
    volume
}
