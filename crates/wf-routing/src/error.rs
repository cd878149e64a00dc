//! Routing error type.

use std::time::Duration;

use thiserror::Error;

use wf_core::CoreError;

use crate::ProviderError;

/// Errors produced by `wf-routing`.
///
/// `Provider` and `Timeout` are recovered inside the resolver; only
/// `InvalidInput` and `Config` ever reach a caller of
/// [`RouteResolver`][crate::RouteResolver].
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("directions provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("no route within {0:?}")]
    Timeout(Duration),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("routing configuration error: {0}")]
    Config(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
