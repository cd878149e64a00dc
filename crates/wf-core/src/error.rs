//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so input validation done here surfaces unchanged
//! as `InvalidInput` further up.

use thiserror::Error;

/// Errors produced while validating `wf-core` values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("polyline is empty")]
    EmptyPolyline,

    #[error("route must contain at least 2 coordinates, got {0}")]
    DegenerateRoute(usize),

    #[error("{what} must be finite and non-negative, got {value}")]
    InvalidMeasurement { what: &'static str, value: f64 },

    #[error("route covers {distance_m} m in zero travel time")]
    ZeroTravelTime { distance_m: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
