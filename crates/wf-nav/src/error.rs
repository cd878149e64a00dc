use thiserror::Error;

use wf_core::{CoreError, RequestId};
use wf_heading::HeadingError;
use wf_options::OptionsError;
use wf_position::PositionError;
use wf_routing::RoutingError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("position error: {0}")]
    Position(#[from] PositionError),

    #[error("heading error: {0}")]
    Heading(#[from] HeadingError),

    #[error("no route option is selected")]
    NoSelection,

    #[error("route request {0} was superseded by a newer one")]
    Superseded(RequestId),

    #[error("navigation session has shut down")]
    SessionClosed,

    #[error("route resolution task failed: {0}")]
    TaskFailed(String),

    #[error("navigation configuration error: {0}")]
    Config(String),
}

pub type NavResult<T> = Result<T, NavError>;
