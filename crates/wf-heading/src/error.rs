use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeadingError {
    #[error("alignment tolerance must be in [0, 180), got {0}")]
    InvalidTolerance(f64),

    #[error("re-arm threshold must be finite and >= 0, got {0}")]
    InvalidThreshold(f64),
}

pub type HeadingResult<T> = Result<T, HeadingError>;
