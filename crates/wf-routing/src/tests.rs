//! Unit tests for wf-routing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use wf_core::{Coordinate, Instruction, RouteResult, TransportMode};

use crate::{DirectionsProvider, ProviderError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FERRY_BUILDING: Coordinate = Coordinate::new(37.7955, -122.3937);
const COIT_TOWER:     Coordinate = Coordinate::new(37.8024, -122.4058);

/// A three-point "rich" route with real instructions.
fn rich_route() -> RouteResult {
    RouteResult {
        coordinates: vec![
            FERRY_BUILDING,
            Coordinate::new(37.7990, -122.3990),
            COIT_TOWER,
        ],
        steps: vec![
            Instruction::new("Turn left onto The Embarcadero"),
            Instruction::new(""),
            Instruction::new("Arrive at Coit Tower"),
        ],
        travel_time_secs: 240.0,
        distance_m:       1700.0,
    }
}

/// Never answers.
struct StalledProvider;

#[async_trait]
impl DirectionsProvider for StalledProvider {
    async fn compute_route(
        &self,
        _start: Coordinate,
        _end:   Coordinate,
        _mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError> {
        std::future::pending().await
    }
}

/// Answers with `route` after `delay`, counting calls.
struct DelayedProvider {
    delay: Duration,
    route: RouteResult,
    calls: Arc<AtomicUsize>,
}

impl DelayedProvider {
    fn new(delay: Duration, route: RouteResult) -> Self {
        Self { delay, route, calls: Arc::new(AtomicUsize::new(0)) }
    }
}

#[async_trait]
impl DirectionsProvider for DelayedProvider {
    async fn compute_route(
        &self,
        _start: Coordinate,
        _end:   Coordinate,
        _mode:  TransportMode,
    ) -> Result<RouteResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.route.clone())
    }
}

// ── SpeedModel ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod speed {
    use wf_core::BaseModeClass;

    use crate::SpeedModel;

    #[test]
    fn nominal_table() {
        let s = SpeedModel::default();
        assert_eq!(s.nominal_speed_mps(BaseModeClass::Drive), 13.8);
        assert_eq!(s.nominal_speed_mps(BaseModeClass::Walk), 1.4);
        assert_eq!(s.nominal_speed_mps(BaseModeClass::Transit), 8.3);
        assert_eq!(s.nominal_speed_mps(BaseModeClass::RideShare), 13.8);
    }

    #[test]
    fn zero_speed_rejected() {
        let s = SpeedModel { walk_mps: 0.0, ..SpeedModel::default() };
        assert!(s.validate().is_err());
        let s = SpeedModel { transit_mps: f64::NAN, ..SpeedModel::default() };
        assert!(s.validate().is_err());
    }
}

// ── Fares ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fare {
    use crate::{FareProvider, FareSchedule, estimate_fare_usd};

    #[test]
    fn uber_like_ten_km() {
        let f = estimate_fare_usd(FareProvider::UberLike, 10.0);
        assert!((f.low_usd - 14.875).abs() < 1e-9);
        assert!((f.high_usd - 23.625).abs() < 1e-9);
        assert_eq!(f.display(), "$14–$23");
    }

    #[test]
    fn lyft_like_ten_km() {
        let f = estimate_fare_usd(FareProvider::LyftLike, 10.0);
        // 2.00 + 14.0 = 16.0
        assert!((f.low_usd - 13.6).abs() < 1e-9);
        assert!((f.high_usd - 21.6).abs() < 1e-9);
    }

    #[test]
    fn short_trip_hits_minimum() {
        let f = estimate_fare_usd(FareProvider::UberLike, 1.3110770);
        assert_eq!(f.low_usd, 5.0);
        assert!((f.high_usd - 6.0299).abs() < 1e-3);
        assert_eq!(f.to_string(), "$5–$6");
    }

    #[test]
    fn custom_schedule() {
        let mut s = FareSchedule::default();
        s.lyft_like.base_usd = 10.0;
        let f = s.estimate(FareProvider::LyftLike, 0.0);
        assert!((f.high_usd - 13.5).abs() < 1e-9);
        assert!((f.low_usd - 8.5).abs() < 1e-9);
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agents {
    use wf_core::{TransportMode, distance_meters};

    use super::*;
    use crate::agent::DIRECT_INSTRUCTION;
    use crate::{FallbackAgent, PrimaryAgent, RouteAgent, RoutingError, SpeedModel};

    #[test]
    fn fallback_is_straight_line() {
        let agent = FallbackAgent::default();
        let r = agent.straight_line(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive);
        let d = distance_meters(FERRY_BUILDING, COIT_TOWER);
        assert_eq!(r.coordinates, vec![FERRY_BUILDING, COIT_TOWER]);
        assert_eq!(r.steps.len(), 1);
        assert_eq!(r.steps[0].text, DIRECT_INSTRUCTION);
        assert_eq!(r.distance_m, d);
        assert!((r.travel_time_secs - d / 13.8).abs() < 1e-9);
    }

    #[test]
    fn fallback_uses_class_speed() {
        let agent = FallbackAgent::default();
        let walk = agent.straight_line(FERRY_BUILDING, COIT_TOWER, TransportMode::Walk);
        let transit = agent.straight_line(FERRY_BUILDING, COIT_TOWER, TransportMode::Transit);
        assert!((walk.travel_time_secs - walk.distance_m / 1.4).abs() < 1e-9);
        assert!((transit.travel_time_secs - transit.distance_m / 8.3).abs() < 1e-9);
    }

    #[test]
    fn fallback_identical_points() {
        let r = FallbackAgent::default().straight_line(FERRY_BUILDING, FERRY_BUILDING, TransportMode::Walk);
        assert_eq!(r.distance_m, 0.0);
        assert_eq!(r.travel_time_secs, 0.0);
        assert_eq!(r.coordinates.len(), 2);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn fallback_rejects_bad_speeds() {
        let speeds = SpeedModel { drive_mps: -1.0, ..SpeedModel::default() };
        assert!(matches!(FallbackAgent::new(speeds), Err(RoutingError::Config(_))));
    }

    #[tokio::test]
    async fn primary_rejects_degenerate_provider_route() {
        let mut bad = rich_route();
        bad.coordinates.truncate(1);
        let agent = PrimaryAgent::new(DelayedProvider::new(Duration::ZERO, bad));
        let err = agent
            .compute_route(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::Provider(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn primary_rejects_instant_provider_route() {
        let mut bad = rich_route();
        bad.travel_time_secs = 0.0;
        let agent = PrimaryAgent::new(DelayedProvider::new(Duration::ZERO, bad));
        let err = agent
            .compute_route(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Provider(ProviderError::InvalidResponse(wf_core::CoreError::ZeroTravelTime { .. }))
        ));
    }

    #[tokio::test]
    async fn primary_passes_valid_route_through() {
        let agent = PrimaryAgent::new(DelayedProvider::new(Duration::ZERO, rich_route()));
        let r = agent
            .compute_route(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive)
            .await
            .unwrap();
        assert_eq!(r, rich_route());
        // Empty "continue" instruction is not rewritten.
        assert_eq!(r.steps[1].text, "");
    }
}

// ── RouteResolver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolver {
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use wf_core::{BaseModeClass, Coordinate, TransportMode};

    use super::*;
    use crate::{
        FallbackAgent, FallbackReason, Resolution, ResolverConfig, RouteResolver, RoutingError,
        UnavailableProvider,
    };

    fn config(secs: u64) -> ResolverConfig {
        ResolverConfig { deadline: Duration::from_secs(secs) }
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_primary_wins() {
        let resolver = RouteResolver::with_provider(
            DelayedProvider::new(Duration::from_secs(2), rich_route()),
            FallbackAgent::default(),
            config(10),
        )
        .unwrap();

        let t0 = Instant::now();
        let r = resolver.resolve(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive).await.unwrap();
        assert_eq!(r.resolution, Resolution::Resolved);
        assert_eq!(r.route, rich_route());
        assert!(t0.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_primary_falls_back_at_deadline() {
        let resolver =
            RouteResolver::with_provider(StalledProvider, FallbackAgent::default(), config(10)).unwrap();

        let t0 = Instant::now();
        let r = resolver.resolve(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive).await.unwrap();
        let elapsed = t0.elapsed();

        assert!(elapsed >= Duration::from_secs(10), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(10_050), "{elapsed:?}");
        assert_eq!(
            r.resolution,
            Resolution::FellBack(FallbackReason::Timeout(Duration::from_secs(10)))
        );
        assert_eq!(r.route, FallbackAgent::default().straight_line(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive));
        assert!((r.route.travel_time_secs - r.route.distance_m / 13.8).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_primary_result_is_discarded() {
        let provider = DelayedProvider::new(Duration::from_secs(20), rich_route());
        let resolver =
            RouteResolver::with_provider(provider, FallbackAgent::default(), config(10)).unwrap();
        let r = resolver.resolve(FERRY_BUILDING, COIT_TOWER, TransportMode::Walk).await.unwrap();
        assert!(r.resolution.is_fallback());
        assert_eq!(r.route.coordinates.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_primary_falls_back_immediately() {
        let resolver =
            RouteResolver::with_provider(UnavailableProvider, FallbackAgent::default(), config(10))
                .unwrap();
        let t0 = Instant::now();
        let r = resolver.resolve(FERRY_BUILDING, COIT_TOWER, TransportMode::Transit).await.unwrap();
        assert_eq!(t0.elapsed(), Duration::ZERO);
        assert!(matches!(r.resolution, Resolution::FellBack(FallbackReason::PrimaryFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn primary_attempted_once() {
        let provider = DelayedProvider::new(Duration::from_secs(30), rich_route());
        let calls = provider.calls.clone();
        let resolver =
            RouteResolver::with_provider(provider, FallbackAgent::default(), config(1)).unwrap();
        resolver.resolve(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_coordinates_surface() {
        let resolver =
            RouteResolver::with_provider(UnavailableProvider, FallbackAgent::default(), config(1))
                .unwrap();
        let bad = Coordinate::new(f64::NAN, 0.0);
        let err = resolver.resolve(bad, COIT_TOWER, TransportMode::Drive).await.unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
    }

    #[test]
    fn zero_deadline_rejected() {
        let cfg = ResolverConfig { deadline: Duration::ZERO };
        assert!(RouteResolver::with_provider(UnavailableProvider, FallbackAgent::default(), cfg).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_yields_nothing() {
        let resolver =
            RouteResolver::with_provider(StalledProvider, FallbackAgent::default(), config(10)).unwrap();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let t0 = Instant::now();
        let r = resolver
            .resolve_cancellable(FERRY_BUILDING, COIT_TOWER, TransportMode::Drive, &token)
            .await
            .unwrap();
        assert!(r.is_none());
        assert!(t0.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn bases_race_concurrently_and_dedupe() {
        let provider = Arc::new(DelayedProvider::new(Duration::from_secs(3), rich_route()));
        let resolver =
            RouteResolver::with_provider(provider.clone(), FallbackAgent::default(), config(10))
                .unwrap();

        let t0 = Instant::now();
        let bases = resolver
            .resolve_bases(
                FERRY_BUILDING,
                COIT_TOWER,
                &[BaseModeClass::Drive, BaseModeClass::RideShare, BaseModeClass::Walk],
                &CancellationToken::new(),
            )
            .await
            .unwrap()
            .unwrap();

        // Drive and ride-share share one race; the two races overlap.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert!(t0.elapsed() < Duration::from_secs(4));
        assert!(bases.drive.is_some());
        assert!(bases.walk.is_some());
        assert!(bases.transit.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn all_bases_fall_back_when_offline() {
        let resolver =
            RouteResolver::with_provider(StalledProvider, FallbackAgent::default(), config(10)).unwrap();
        let bases = resolver
            .resolve_bases(FERRY_BUILDING, COIT_TOWER, &BaseModeClass::MEASURED, &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();
        for class in BaseModeClass::MEASURED {
            assert_eq!(bases.get(class).unwrap().coordinates.len(), 2);
        }
    }
}
