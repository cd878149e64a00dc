//! `wf-core` — foundational types for the `wayfinder` navigation engine.
//!
//! This crate is a dependency of every other `wf-*` crate.  It intentionally
//! has no `wf-*` dependencies and no async runtime; everything here is plain
//! value types and pure functions.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`geo`]         | `Coordinate`, haversine distance, bearings                |
//! | [`polyline`]    | Polyline length, nearest vertex, remaining distance       |
//! | [`ids`]         | `OptionId`, `RequestId`                                   |
//! | [`transport`]   | `TransportMode`, `BaseModeClass`                          |
//! | [`route`]       | `RouteResult`, `Instruction`, `BaseRoutes`                |
//! | [`fix`]         | `Fix`, `FixOrigin`                                        |
//! | [`time`]        | `FixClock`: monotonic elapsed time → epoch seconds        |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod fix;
pub mod geo;
pub mod ids;
pub mod polyline;
pub mod route;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use fix::{Fix, FixOrigin};
pub use geo::{
    Coordinate, angular_difference, distance_meters, format_distance, initial_bearing_degrees,
    normalize_degrees, normalize_relative_bearing,
};
pub use ids::{OptionId, RequestId};
pub use polyline::{RemainingDistance, nearest_vertex, polyline_length, remaining_distance};
pub use route::{BaseRoutes, Instruction, RouteResult};
pub use time::FixClock;
pub use transport::{BaseModeClass, TransportMode};
