use crate::{world::BodyHandle, Vector2f};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Can't specify both x/y and a position for a rectangle")]
    PositionConflict,

    #[error("Can't specify both width/height and a size for a rectangle")]
    SizeConflict,

    #[error("Rectangle size must not be negative, got {0}")]
    NegativeSize(Vector2f),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("No such body {0}")]
    UnknownBody(BodyHandle),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Tick rate must be at least one tick per second")]
    ZeroTickRate,
}
