//! Session observers: the explicit subscription interface.

use std::time::Duration;

use tokio::sync::broadcast;

use wf_core::{Coordinate, Fix, FixOrigin, RequestId};
use wf_heading::AlignmentEvent;
use wf_options::{RouteOption, RouteOptionSet};

/// Callbacks invoked by [`NavSession`][crate::NavSession] after each state
/// transition has been applied.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Hooks run on the session's serialized
/// path and must not block.
pub trait NavObserver: Send {
    /// A resolution finished and its option set replaced the previous one.
    fn on_options(&mut self, _request: RequestId, _options: &RouteOptionSet) {}

    /// An option became the selected one (explicitly or by auto-selection).
    fn on_selection(&mut self, _option: &RouteOption) {}

    fn on_fix(&mut self, _fix: &Fix, _origin: FixOrigin) {}

    fn on_simulation_started(&mut self, _points: usize, _interval: Duration) {}

    /// `finished` is `true` when playback reached the end of the route,
    /// `false` when it was stopped or replaced.
    fn on_simulation_stopped(&mut self, _finished: bool) {}

    fn on_alignment(&mut self, _event: &AlignmentEvent) {}

    fn on_target(&mut self, _target: Option<Coordinate>) {}
}

/// A [`NavObserver`] that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl NavObserver for NoopObserver {}

// ── Broadcast events ──────────────────────────────────────────────────────────

/// Owned form of every observer callback, for channel subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    OptionsReady { request: RequestId, options: RouteOptionSet },
    SelectionChanged(RouteOption),
    Fix { fix: Fix, origin: FixOrigin },
    SimulationStarted { points: usize, interval: Duration },
    SimulationStopped { finished: bool },
    Aligned(AlignmentEvent),
    TargetChanged(Option<Coordinate>),
}

/// Forwards every callback as a [`NavEvent`] on a `tokio::sync::broadcast`
/// channel.
///
/// Slow subscribers lag and miss events rather than stall the session.
#[derive(Clone, Debug)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<NavEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn emit(&self, event: NavEvent) {
        // No subscribers is not an error.
        let _ = self.tx.send(event);
    }
}

impl NavObserver for EventBroadcaster {
    fn on_options(&mut self, request: RequestId, options: &RouteOptionSet) {
        self.emit(NavEvent::OptionsReady { request, options: options.clone() });
    }

    fn on_selection(&mut self, option: &RouteOption) {
        self.emit(NavEvent::SelectionChanged(option.clone()));
    }

    fn on_fix(&mut self, fix: &Fix, origin: FixOrigin) {
        self.emit(NavEvent::Fix { fix: *fix, origin });
    }

    fn on_simulation_started(&mut self, points: usize, interval: Duration) {
        self.emit(NavEvent::SimulationStarted { points, interval });
    }

    fn on_simulation_stopped(&mut self, finished: bool) {
        self.emit(NavEvent::SimulationStopped { finished });
    }

    fn on_alignment(&mut self, event: &AlignmentEvent) {
        self.emit(NavEvent::Aligned(*event));
    }

    fn on_target(&mut self, target: Option<Coordinate>) {
        self.emit(NavEvent::TargetChanged(target));
    }
}
