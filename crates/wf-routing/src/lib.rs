//! `wf-routing` — route agents and the failover resolver.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`provider`] | `DirectionsProvider` trait, `ProviderError`, `UnavailableProvider` |
//! | [`agent`]    | `RouteAgent` trait, `PrimaryAgent`, `FallbackAgent`           |
//! | [`speed`]    | `SpeedModel`: nominal speed per base mode class               |
//! | [`fare`]     | Ride-share fare schedule and `FareEstimate`                   |
//! | [`resolver`] | `RouteResolver`: primary vs. deadline race with fallback      |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                            |
//!
//! # Failure model
//!
//! The external provider is untrusted for both latency and availability.
//! [`RouteResolver::resolve`] always returns a route for valid input: a
//! primary result if one arrives before the deadline, otherwise the
//! straight-line route from [`FallbackAgent`].  The only error a caller can
//! see is `RoutingError::InvalidInput`.

pub mod agent;
pub mod error;
pub mod fare;
pub mod provider;
pub mod resolver;
pub mod speed;

#[cfg(test)]
mod tests;

pub use agent::{FallbackAgent, PrimaryAgent, RouteAgent};
pub use error::{RoutingError, RoutingResult};
pub use fare::{FareEstimate, FareProvider, FareRate, FareSchedule, estimate_fare_usd};
pub use provider::{DirectionsProvider, ProviderError, UnavailableProvider};
pub use resolver::{FallbackReason, Resolution, ResolvedRoute, ResolverConfig, RouteResolver};
pub use speed::SpeedModel;
