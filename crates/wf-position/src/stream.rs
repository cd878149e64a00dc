//! The playback state machine.
//!
//! `PositionStream` is runtime-free: it owns the polyline and the cursor and
//! turns each tick into at most one [`Fix`].  The timer that drives it lives
//! in [`SimulatedSource`][crate::SimulatedSource].

use std::time::Duration;

use tracing::debug;

use wf_core::{Coordinate, Fix, initial_bearing_degrees, normalize_degrees};

use crate::{PositionError, PositionResult};

// ── Config ────────────────────────────────────────────────────────────────────

/// Playback constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackConfig {
    /// Tick interval at speed multiplier 1.
    pub base_interval_secs: f64,
    /// Speed reported on every simulated fix.
    pub simulated_speed_mps: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { base_interval_secs: 0.5, simulated_speed_mps: 15.0 }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> PositionResult<()> {
        if !(self.base_interval_secs.is_finite() && self.base_interval_secs > 0.0) {
            return Err(PositionError::Config(format!(
                "base_interval_secs must be > 0, got {}",
                self.base_interval_secs
            )));
        }
        if !(self.simulated_speed_mps.is_finite() && self.simulated_speed_mps >= 0.0) {
            return Err(PositionError::Config(format!(
                "simulated_speed_mps must be >= 0, got {}",
                self.simulated_speed_mps
            )));
        }
        Ok(())
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Running,
}

/// Deterministic fix generator over a polyline.
///
/// ```text
///   Idle ──start()──► Running ──stop() / end of polyline──► Idle
///                       │  ▲
///                       └──┘ start(): restart from index 0
/// ```
///
/// Each tick at index `i` emits `polyline[i]` with a course taken from the
/// segment leaving it, or the segment arriving at it for the last vertex.
/// A one-point polyline uses the heading hint (0 if none).  The tick after
/// the last vertex moves the stream to `Idle` and emits nothing.
#[derive(Clone, Debug)]
pub struct PositionStream {
    polyline:     Vec<Coordinate>,
    interval:     Duration,
    config:       PlaybackConfig,
    state:        StreamState,
    index:        usize,
    heading_hint: Option<f64>,
}

impl PositionStream {
    /// Validate the inputs and build an idle stream.
    ///
    /// # Errors
    ///
    /// - `EmptyPolyline` for an empty polyline.
    /// - `InvalidCoordinate` for any non-finite or out-of-range vertex.
    /// - `InvalidSpeedMultiplier` if `speed_multiplier` is not finite and
    ///   positive, or yields an unusable tick interval.
    /// - `Config` if `config` is invalid.
    pub fn new(
        polyline:         Vec<Coordinate>,
        speed_multiplier: f64,
        config:           PlaybackConfig,
    ) -> PositionResult<Self> {
        config.validate()?;
        if polyline.is_empty() {
            return Err(PositionError::EmptyPolyline);
        }
        if let Some(index) = polyline.iter().position(|c| !c.is_valid()) {
            return Err(PositionError::InvalidCoordinate { index });
        }
        if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
            return Err(PositionError::InvalidSpeedMultiplier(speed_multiplier));
        }
        let interval = Duration::try_from_secs_f64(config.base_interval_secs / speed_multiplier)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or(PositionError::InvalidSpeedMultiplier(speed_multiplier))?;

        Ok(Self {
            polyline,
            interval,
            config,
            state: StreamState::Idle,
            index: 0,
            heading_hint: None,
        })
    }

    /// Begin playback from the first vertex.  Restarting a running stream
    /// is a full stop followed by a start.
    pub fn start(&mut self) {
        if self.state == StreamState::Running {
            self.stop();
        }
        self.index = 0;
        self.state = StreamState::Running;
        debug!(points = self.polyline.len(), interval = ?self.interval, "playback started");
    }

    pub fn stop(&mut self) {
        if self.state == StreamState::Running {
            debug!(emitted = self.index, "playback stopped");
        }
        self.state = StreamState::Idle;
    }

    /// Advance by one tick at wall-clock time `now_secs`.
    ///
    /// Callers supply strictly increasing `now_secs`; the stream does not
    /// reorder time.
    pub fn tick(&mut self, now_secs: f64) -> Option<Fix> {
        if self.state != StreamState::Running {
            return None;
        }
        let i = self.index;
        let Some(&coordinate) = self.polyline.get(i) else {
            self.state = StreamState::Idle;
            debug!(emitted = i, "playback reached end of route");
            return None;
        };

        let course_deg = match (self.polyline.get(i + 1), i.checked_sub(1)) {
            (Some(&next), _) => initial_bearing_degrees(coordinate, next),
            (None, Some(prev)) => initial_bearing_degrees(self.polyline[prev], coordinate),
            (None, None) => self.heading_hint.unwrap_or(0.0),
        };

        self.index += 1;
        Some(Fix {
            coordinate,
            course_deg,
            speed_mps: self.config.simulated_speed_mps,
            timestamp_secs: now_secs,
        })
    }

    /// Period between ticks: `base_interval_secs / speed_multiplier`.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    /// Heading used as the course when the polyline has a single vertex.
    pub fn set_heading_hint(&mut self, heading_deg: f64) {
        if heading_deg.is_finite() {
            self.heading_hint = Some(normalize_degrees(heading_deg));
        }
    }

    #[inline]
    pub fn state(&self) -> StreamState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == StreamState::Running
    }

    /// Index of the next vertex to emit.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn polyline(&self) -> &[Coordinate] {
        &self.polyline
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }
}
