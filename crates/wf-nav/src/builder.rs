//! Fluent builder for constructing a [`NavSession`].

use wf_core::TransportMode;
use wf_position::{IdleLocationSource, LiveLocationSource};
use wf_routing::DirectionsProvider;

use crate::{NavConfig, NavObserver, NavResult, NavSession, NoopObserver};

/// Fluent builder for [`NavSession<P, O>`].
///
/// # Required inputs
///
/// - `P: DirectionsProvider`: the external routing capability
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                               |
/// |------------------------|---------------------------------------|
/// | `.config(c)`           | `NavConfig::default()`                |
/// | `.live_source(s)`      | `IdleLocationSource` (never yields)   |
/// | `.observer(o)`         | `NoopObserver`                        |
/// | `.preferred_mode(m)`   | none (auto-select falls back to drive) |
///
/// # Example
///
/// ```rust,ignore
/// let (gps_tx, gps) = ChannelLocationSource::new(16);
/// let events = EventBroadcaster::new(64);
/// let mut session = NavSessionBuilder::new(provider)
///     .config(NavConfig::from_env()?)
///     .live_source(gps)
///     .observer(events.clone())
///     .build()?;
/// session.resolve_routes(start, end, &[]).await?;
/// ```
pub struct NavSessionBuilder<P: DirectionsProvider, O: NavObserver = NoopObserver> {
    provider:       P,
    config:         NavConfig,
    live:           Option<Box<dyn LiveLocationSource>>,
    observer:       O,
    preferred_mode: Option<TransportMode>,
}

impl<P: DirectionsProvider> NavSessionBuilder<P, NoopObserver> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config:         NavConfig::default(),
            live:           None,
            observer:       NoopObserver,
            preferred_mode: None,
        }
    }
}

impl<P: DirectionsProvider, O: NavObserver> NavSessionBuilder<P, O> {
    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    /// The platform location feed consumed whenever no simulation runs.
    pub fn live_source<L: LiveLocationSource + 'static>(mut self, live: L) -> Self {
        self.live = Some(Box::new(live));
        self
    }

    /// Replace the observer, changing the session's observer type.
    pub fn observer<O2: NavObserver>(self, observer: O2) -> NavSessionBuilder<P, O2> {
        NavSessionBuilder {
            provider:       self.provider,
            config:         self.config,
            live:           self.live,
            observer,
            preferred_mode: self.preferred_mode,
        }
    }

    /// Mode auto-selected when a resolution offers it.
    pub fn preferred_mode(mut self, mode: TransportMode) -> Self {
        self.preferred_mode = Some(mode);
        self
    }

    /// Validate the configuration and build the session.
    pub fn build(self) -> NavResult<NavSession<P, O>> {
        let live = self
            .live
            .unwrap_or_else(|| Box::new(IdleLocationSource::default()));
        NavSession::new(self.provider, self.config, live, self.observer, self.preferred_mode)
    }
}
