//! `wf-position` — the position channel.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`stream`]   | `PositionStream` state machine, `PlaybackConfig`                |
//! | [`playback`] | `SimulatedSource`: tokio-interval driven playback               |
//! | [`source`]   | `FixSource`, `LiveLocationSource`, channel and idle live sources |
//! | [`error`]    | `PositionError`, `PositionResult<T>`                            |
//!
//! Live GPS and route playback both implement [`FixSource`], so a consumer
//! handles one stream of [`Fix`][wf_core::Fix] values and never needs to
//! know where they came from.

pub mod error;
pub mod playback;
pub mod source;
pub mod stream;


pub use error::{PositionError, PositionResult};
pub use playback::SimulatedSource;
pub use source::{ChannelLocationSource, FixSource, IdleLocationSource, LiveLocationSource};
pub use stream::{PlaybackConfig, PositionStream, StreamState};
