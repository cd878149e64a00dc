use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("cannot play back an empty polyline")]
    EmptyPolyline,

    #[error("polyline vertex {index} is not a valid coordinate")]
    InvalidCoordinate { index: usize },

    #[error("speed multiplier must be finite and > 0, got {0}")]
    InvalidSpeedMultiplier(f64),

    #[error("invalid playback config: {0}")]
    Config(String),
}

pub type PositionResult<T> = Result<T, PositionError>;
