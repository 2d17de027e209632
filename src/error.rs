use thiserror::Error;

/// Failures surfaced to callers. Consistency problems found while editing
/// centerlines are logged and counted instead, see `cycles::BackupOutcome`.
#[derive(Debug, Error)]
pub enum VesselError {
    /// Two nodes passed where adjacency is required differ by more than one
    /// step on some axis (or coincide).
    #[error("nodes are not neighbours: dx={dx} dy={dy} dz={dz}")]
    InvalidAdjacency { dx: u32, dy: u32, dz: u32 },
    #[error("size mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("no node at {0}")]
    NodeNotFound(crate::types::Position),
    #[error("voxel resolution must be positive and finite, got ({x}, {y}, {z})")]
    InvalidResolution { x: f32, y: f32, z: f32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VesselError>;
