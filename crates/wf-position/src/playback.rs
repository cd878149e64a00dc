//! Timer-driven playback of a [`PositionStream`].

use async_trait::async_trait;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use wf_core::{Fix, FixClock};

use crate::{FixSource, PositionStream};

/// A running [`PositionStream`] paced by a tokio interval.
///
/// The first fix is emitted one tick interval after [`start`](Self::start).
/// Timestamps come from the interval's scheduled instants mapped through a
/// [`FixClock`] anchored at the start instant, so consecutive fixes are
/// spaced by exactly the tick interval.  Ticks are fire-and-forget: the
/// interval keeps its cadence whether or not anyone awaits the next fix,
/// and ticks that elapse while nobody polls are delivered back to back
/// with their scheduled timestamps.
#[derive(Debug)]
pub struct SimulatedSource {
    stream:     PositionStream,
    interval:   Interval,
    clock:      FixClock,
    started_at: Instant,
}

impl SimulatedSource {
    /// Start (or restart) `stream` and schedule its ticks.
    ///
    /// `clock` maps the start instant to a wall-clock timestamp.
    pub fn start(mut stream: PositionStream, clock: FixClock) -> Self {
        stream.start();
        let period = stream.tick_interval();
        let started_at = Instant::now();
        let mut interval = interval_at(started_at + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self { stream, interval, clock, started_at }
    }

    pub fn stop(&mut self) {
        self.stream.stop();
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_running()
    }

    pub fn stream(&self) -> &PositionStream {
        &self.stream
    }

    /// Forward a compass heading to the stream's single-point fallback.
    pub fn set_heading_hint(&mut self, heading_deg: f64) {
        self.stream.set_heading_hint(heading_deg);
    }

    /// Consume the source, returning the stream in its current state.
    pub fn into_stream(self) -> PositionStream {
        self.stream
    }
}

#[async_trait]
impl FixSource for SimulatedSource {
    async fn next_fix(&mut self) -> Option<Fix> {
        if !self.stream.is_running() {
            return None;
        }
        let at = self.interval.tick().await;
        let ts = self.clock.timestamp_at(at.duration_since(self.started_at));
        self.stream.tick(ts)
    }
}
