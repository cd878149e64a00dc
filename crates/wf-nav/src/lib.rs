//! `wf-nav` — one navigation session behind a single serialized owner.
//!
//! # Session model
//!
//! ```text
//!  resolve_routes ─► RouteResolver (race per base class) ─► RouteOptionSynthesizer
//!                                                              │
//!                          select_option / select_mode ◄── RouteOptionSet
//!                                                              │
//!  start_simulation ─► SimulatedSource ─┐                      ▼
//!  live GPS ─────────► LiveLocationSource ┴─► next_fix ─► apply_fix ─► HeadingTracker
//!                                                              ▲
//!  observe_heading ────────────────────────────────────────────┘
//! ```
//!
//! [`NavSession`] owns every piece of mutable state and exposes it only
//! through `&mut self` commands.  Drive it directly from one task, or hand it
//! to [`spawn_session`] and talk to it through a cloneable
//! [`SessionHandle`].  Observers ([`NavObserver`]) are notified after each
//! transition; [`EventBroadcaster`] turns those callbacks into a
//! `tokio::sync::broadcast` stream of [`NavEvent`]s.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wf_nav::{NavConfig, NavSessionBuilder, spawn_session};
//! use wf_routing::UnavailableProvider;
//!
//! let session = NavSessionBuilder::new(UnavailableProvider)
//!     .config(NavConfig::from_env()?)
//!     .build()?;
//! let handle = spawn_session(session);
//! let options = handle.resolve_routes(start, end, &[]).await?;
//! handle.simulate_selected(1.0).await?;
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod session;


pub use builder::NavSessionBuilder;
pub use config::NavConfig;
pub use driver::{SessionHandle, spawn_session};
pub use error::{NavError, NavResult};
pub use observer::{EventBroadcaster, NavEvent, NavObserver, NoopObserver};
pub use session::{NavProgress, NavSession, RouteRequest, SessionSnapshot};
