//! Volume containers and I/O for segmented intensity grids.
//!
//! Volumes are stored slice-major (`z * width * height + y * width + x`) with
//! no padding. Zero intensity is background; anything above zero is
//! foreground.

pub mod io;
pub mod slice;
pub mod traits;
pub mod u16;

pub use self::slice::SliceF32;
pub use self::traits::VolumeView;
pub use self::u16::VolumeU16;
