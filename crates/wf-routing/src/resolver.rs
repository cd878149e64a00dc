//! The failover race.
//!
//! ```text
//!            ┌── primary.compute_route ──┐
//! Racing ────┤                           ├──► Resolved   (primary Ok first)
//!            └── sleep(deadline) ────────┘
//!                         │ deadline first, or primary Err
//!                         ▼
//!               fallback.straight_line  ──► FellBack
//! ```
//!
//! The primary is attempted at most once per call; this is a race with a
//! deterministic fallback, not a retry loop.  Whichever branch loses is
//! dropped, which cancels the primary's in-flight work.  A late primary
//! result has nowhere to go and is discarded with it.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use wf_core::{BaseModeClass, BaseRoutes, Coordinate, RouteResult, TransportMode};

use crate::{
    DirectionsProvider, FallbackAgent, PrimaryAgent, RouteAgent, RoutingError, RoutingResult,
};

// ── Config ────────────────────────────────────────────────────────────────────

/// Resolver tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// How long the primary agent may take before the fallback is used.
    pub deadline: Duration,
}

impl ResolverConfig {
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

    pub fn validate(&self) -> RoutingResult<()> {
        if self.deadline.is_zero() {
            return Err(RoutingError::Config("resolver deadline must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { deadline: Self::DEFAULT_DEADLINE }
    }
}

// ── Outcome types ─────────────────────────────────────────────────────────────

/// Why the fallback route was used.
#[derive(Clone, Debug, PartialEq)]
pub enum FallbackReason {
    /// The primary did not answer within the deadline.
    Timeout(Duration),
    /// The primary answered with an error (message kept for diagnostics).
    PrimaryFailed(String),
}

/// Terminal state of one resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved,
    FellBack(FallbackReason),
}

impl Resolution {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::FellBack(_))
    }
}

/// The single route a resolution commits to.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRoute {
    pub mode:       TransportMode,
    pub route:      RouteResult,
    pub resolution: Resolution,
}

// ── RouteResolver ─────────────────────────────────────────────────────────────

/// Races a primary [`RouteAgent`] against a deadline and falls back to a
/// straight line.
///
/// # Type parameter
///
/// `A` is the primary strategy, usually [`PrimaryAgent<P>`] built through
/// [`RouteResolver::with_provider`].  The fallback is always the concrete
/// [`FallbackAgent`]; the guarantee that resolution never fails rests on it
/// being infallible.
pub struct RouteResolver<A: RouteAgent> {
    primary:  A,
    fallback: FallbackAgent,
    config:   ResolverConfig,
}

impl<P: DirectionsProvider> RouteResolver<PrimaryAgent<P>> {
    /// Resolver whose primary delegates to `provider`.
    pub fn with_provider(
        provider: P,
        fallback: FallbackAgent,
        config:   ResolverConfig,
    ) -> RoutingResult<Self> {
        Self::new(PrimaryAgent::new(provider), fallback, config)
    }
}

impl<A: RouteAgent> RouteResolver<A> {
    pub fn new(primary: A, fallback: FallbackAgent, config: ResolverConfig) -> RoutingResult<Self> {
        config.validate()?;
        Ok(Self { primary, fallback, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn fallback(&self) -> &FallbackAgent {
        &self.fallback
    }

    /// Resolve one route.
    ///
    /// Suspends until the primary answers or the deadline elapses, whichever
    /// is first.  Always returns a route for valid coordinates.
    ///
    /// # Errors
    ///
    /// `RoutingError::InvalidInput` if either coordinate is non-finite or out
    /// of range.  Provider failures are never returned.
    pub async fn resolve(
        &self,
        start: Coordinate,
        end:   Coordinate,
        mode:  TransportMode,
    ) -> RoutingResult<ResolvedRoute> {
        start.validate()?;
        end.validate()?;
        Ok(self.race(start, end, mode, std::future::pending()).await.unwrap_or_else(|| {
            // Unreachable in practice: `pending()` never completes.
            self.fall_back(start, end, mode, FallbackReason::PrimaryFailed("cancelled".into()))
        }))
    }

    /// [`resolve`][Self::resolve], abandoned if `cancel` fires first.
    ///
    /// Returns `Ok(None)` when cancelled: the request was superseded and
    /// nothing, not even the fallback, is produced for it.
    pub async fn resolve_cancellable(
        &self,
        start:  Coordinate,
        end:    Coordinate,
        mode:   TransportMode,
        cancel: &CancellationToken,
    ) -> RoutingResult<Option<ResolvedRoute>> {
        start.validate()?;
        end.validate()?;
        Ok(self.race(start, end, mode, cancel.cancelled()).await)
    }

    /// Resolve the base route of every class in `classes` concurrently.
    ///
    /// Classes are de-duplicated by the route they read (ride-share shares
    /// the drive slot).  Returns `Ok(None)` if `cancel` fires before every
    /// race has finished.
    pub async fn resolve_bases(
        &self,
        start:   Coordinate,
        end:     Coordinate,
        classes: &[BaseModeClass],
        cancel:  &CancellationToken,
    ) -> RoutingResult<Option<BaseRoutes>> {
        start.validate()?;
        end.validate()?;

        let mut wanted: Vec<BaseModeClass> = classes.iter().map(|c| c.route_source()).collect();
        wanted.sort();
        wanted.dedup();

        let races = wanted.iter().map(|&class| {
            let mode = match class {
                BaseModeClass::Walk    => TransportMode::Walk,
                BaseModeClass::Transit => TransportMode::Transit,
                _                      => TransportMode::Drive,
            };
            async move { (class, self.race(start, end, mode, cancel.cancelled()).await) }
        });

        let mut bases = BaseRoutes::new();
        for (class, outcome) in join_all(races).await {
            match outcome {
                Some(resolved) => bases.insert(class, resolved.route),
                None => return Ok(None),
            }
        }
        Ok(Some(bases))
    }

    // ── Race internals ────────────────────────────────────────────────────

    async fn race<C>(
        &self,
        start:  Coordinate,
        end:    Coordinate,
        mode:   TransportMode,
        cancel: C,
    ) -> Option<ResolvedRoute>
    where
        C: Future<Output = ()>,
    {
        let deadline = self.config.deadline;

        let outcome = tokio::select! {
            biased;

            _ = cancel => {
                debug!(%mode, "route race cancelled");
                return None;
            }
            result = self.primary.compute_route(start, end, mode) => result,
            _ = tokio::time::sleep(deadline) => Err(RoutingError::Timeout(deadline)),
        };

        Some(match outcome {
            Ok(route) => {
                debug!(
                    %mode,
                    agent = self.primary.name(),
                    distance_m = route.distance_m,
                    travel_time_secs = route.travel_time_secs,
                    "route resolved"
                );
                ResolvedRoute { mode, route, resolution: Resolution::Resolved }
            }
            Err(RoutingError::Timeout(d)) => {
                warn!(%mode, deadline_ms = d.as_millis() as u64, "primary agent timed out; using straight-line fallback");
                self.fall_back(start, end, mode, FallbackReason::Timeout(d))
            }
            Err(e) => {
                warn!(%mode, error = %e, "primary agent failed; using straight-line fallback");
                self.fall_back(start, end, mode, FallbackReason::PrimaryFailed(e.to_string()))
            }
        })
    }

    fn fall_back(
        &self,
        start:  Coordinate,
        end:    Coordinate,
        mode:   TransportMode,
        reason: FallbackReason,
    ) -> ResolvedRoute {
        ResolvedRoute {
            mode,
            route: self.fallback.straight_line(start, end, mode),
            resolution: Resolution::FellBack(reason),
        }
    }
}
