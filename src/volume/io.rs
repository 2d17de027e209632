//! I/O helpers for raw volumes, previews and JSON reports.
//!
//! - `load_raw_u16`: read a headerless 16-bit stack (slice-major) from disk.
//! - `save_mip_png`: write a maximum-intensity projection along z as 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::VolumeU16;
use crate::error::{Result, VesselError};
use crate::types::Dims;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a headerless 16-bit volume. The file must hold exactly
/// `dims.len()` samples.
pub fn load_raw_u16(path: &Path, dims: Dims, little_endian: bool) -> Result<VolumeU16> {
    let bytes = fs::read(path)?;
    let expected = dims.len() * 2;
    if bytes.len() != expected {
        return Err(VesselError::DimensionMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let data = bytes
        .chunks_exact(2)
        .map(|b| {
            if little_endian {
                u16::from_le_bytes([b[0], b[1]])
            } else {
                u16::from_be_bytes([b[0], b[1]])
            }
        })
        .collect();
    VolumeU16::from_vec(dims, data)
}

/// Maximum-intensity projection along z, one value per (x, y).
pub fn mip_z(volume: &VolumeU16) -> Vec<u16> {
    let d = volume.dims();
    let mut out = vec![0u16; d.width * d.height];
    for z in 0..d.depth {
        for y in 0..d.height {
            let row = volume.row(y, z);
            let dst = &mut out[y * d.width..(y + 1) * d.width];
            for (o, &v) in dst.iter_mut().zip(row) {
                *o = (*o).max(v);
            }
        }
    }
    out
}

/// Save the z-projection as a grayscale PNG scaled so the brightest voxel is 255.
pub fn save_mip_png(volume: &VolumeU16, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let d = volume.dims();
    let mip = mip_z(volume);
    let max = mip.iter().copied().max().unwrap_or(0).max(1) as f32;
    let mut out = GrayImage::new(d.width as u32, d.height as u32);
    for (i, &v) in mip.iter().enumerate() {
        let px = (v as f32 / max * 255.0).round().clamp(0.0, 255.0) as u8;
        out.put_pixel((i % d.width) as u32, (i / d.width) as u32, Luma([px]));
    }
    out.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
