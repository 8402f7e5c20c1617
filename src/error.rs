use glam::IVec2;
use thiserror::Error;

/// Rejected user placement. The behavior core never sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell ({}, {}) is outside the placeable interior of a {width}x{height} room", cell.x, cell.y)]
    OutOfBounds { cell: IVec2, width: u32, height: u32 },
    #[error("no bed with handle {0:?}")]
    UnknownBed(hecs::Entity),
}

/// Invalid simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("room must be at least {min}x{min} tiles, got {width}x{height}")]
    RoomTooSmall { width: u32, height: u32, min: u32 },
    #[error("tick rate must be positive")]
    ZeroTickRate,
}
