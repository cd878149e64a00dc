//! Route agents: the two strategies the resolver races.
//!
//! # Pluggability
//!
//! The resolver talks to both strategies through [`RouteAgent`], so a test
//! or an application can substitute either side.  The default pairing is a
//! [`PrimaryAgent`] wrapping an external [`DirectionsProvider`] and a
//! [`FallbackAgent`] that needs nothing but geometry.

use async_trait::async_trait;

use wf_core::{Coordinate, Instruction, RouteResult, TransportMode};

use crate::{DirectionsProvider, ProviderError, RoutingError, RoutingResult, SpeedModel};

/// Text of the single instruction on a straight-line route.
pub const DIRECT_INSTRUCTION: &str = "Go directly to destination";

// ── RouteAgent trait ──────────────────────────────────────────────────────────

/// A strategy that can compute a route between two coordinates.
#[async_trait]
pub trait RouteAgent: Send + Sync {
    /// Compute a route from `start` to `end` for `mode`.
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> RoutingResult<RouteResult>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

// ── PrimaryAgent ──────────────────────────────────────────────────────────────

/// Delegates to an external directions provider.
///
/// May take seconds or fail outright.  A provider result that violates the
/// `RouteResult` invariants (fewer than two points, negative or non-finite
/// measurements) is reported as `ProviderError::InvalidResponse`.
pub struct PrimaryAgent<P: DirectionsProvider> {
    provider: P,
}

impl<P: DirectionsProvider> PrimaryAgent<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: DirectionsProvider> RouteAgent for PrimaryAgent<P> {
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> RoutingResult<RouteResult> {
        let route = self.provider.compute_route(start, end, mode.native_mode()).await?;
        route
            .validate()
            .map_err(|e| RoutingError::Provider(ProviderError::InvalidResponse(e)))?;
        Ok(route)
    }

    fn name(&self) -> &'static str {
        "primary"
    }
}

// ── FallbackAgent ─────────────────────────────────────────────────────────────

/// Pure local computation: a straight line at the mode's nominal speed.
///
/// Never fails and never waits, which is what makes it safe to call after
/// the primary has already used up the deadline.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackAgent {
    speeds: SpeedModel,
}

impl FallbackAgent {
    /// Create an agent with custom speeds.  Every speed must be positive.
    pub fn new(speeds: SpeedModel) -> RoutingResult<Self> {
        speeds.validate()?;
        Ok(Self { speeds })
    }

    pub fn speeds(&self) -> &SpeedModel {
        &self.speeds
    }

    /// The straight-line route from `start` to `end`.
    ///
    /// `start == end` yields a zero-length, zero-duration route that still
    /// carries both endpoints.
    pub fn straight_line(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> RouteResult {
        let distance_m = start.distance_m(end);
        RouteResult {
            coordinates:      vec![start, end],
            steps:            vec![Instruction::new(DIRECT_INSTRUCTION)],
            travel_time_secs: self.speeds.travel_time_secs(mode.base_class(), distance_m),
            distance_m,
        }
    }
}

#[async_trait]
impl RouteAgent for FallbackAgent {
    async fn compute_route(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> RoutingResult<RouteResult> {
        Ok(self.straight_line(start, end, mode))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
