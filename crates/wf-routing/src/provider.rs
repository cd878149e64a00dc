//! The external directions capability.
//!
//! A `DirectionsProvider` is whatever computes "rich" routes with real turn
//! instructions: a platform maps SDK, a hosted routing API, an on-device
//! graph router.  The engine never looks inside it and treats every error
//! it reports the same way: the provider is unavailable for this request.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use wf_core::{Coordinate, CoreError, RouteResult, TransportMode};

/// Failures a directions provider may report.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("no route found")]
    NoRoute,

    #[error("mode {0} is not supported by this provider")]
    UnsupportedMode(TransportMode),

    #[error("provider returned an invalid route: {0}")]
    InvalidResponse(#[source] CoreError),
}

/// Pluggable rich-route source.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one provider can serve the
/// concurrent per-mode races of a resolution request.
///
/// # Cancellation
///
/// The resolver drops the returned future when it loses the race.
/// Implementations should not rely on running to completion.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError>;
}

#[async_trait]
impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Arc<P> {
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError> {
        (**self).compute_route(start, end, mode).await
    }
}

#[async_trait]
impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError> {
        (**self).compute_route(start, end, mode).await
    }
}

/// A provider that is never reachable.  Every request fails immediately,
/// so resolution always takes the straight-line path without waiting for
/// the deadline.  Use it for fully offline operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

#[async_trait]
impl DirectionsProvider for UnavailableProvider {
    async fn compute_route(
        &self,
        _start: Coordinate,
        _end:   Coordinate,
        _mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError> {
        Err(ProviderError::Network("offline".into()))
    }
}
