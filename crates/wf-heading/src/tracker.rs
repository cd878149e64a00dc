use tracing::debug;

use wf_core::{angular_difference, normalize_degrees, normalize_relative_bearing};

use crate::{HeadingError, HeadingResult};

// ── Config ────────────────────────────────────────────────────────────────────

/// Alignment tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlignmentConfig {
    /// Half-width of the "dead ahead" window, in degrees.
    pub tolerance_deg: f64,
    /// How far the heading must move from the last firing before the
    /// tracker can fire again, in degrees.
    pub rearm_threshold_deg: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self { tolerance_deg: 1.0, rearm_threshold_deg: 2.0 }
    }
}

impl AlignmentConfig {
    pub fn validate(&self) -> HeadingResult<()> {
        if !(self.tolerance_deg.is_finite() && (0.0..180.0).contains(&self.tolerance_deg)) {
            return Err(HeadingError::InvalidTolerance(self.tolerance_deg));
        }
        if !(self.rearm_threshold_deg.is_finite() && self.rearm_threshold_deg >= 0.0) {
            return Err(HeadingError::InvalidThreshold(self.rearm_threshold_deg));
        }
        Ok(())
    }
}

// ── State / events ────────────────────────────────────────────────────────────

/// Hysteresis memory: the rounded heading of the last firing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingAlignmentState {
    pub last_fired_bucket: Option<i32>,
}

/// Emitted once each time the device comes to point at the target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentEvent {
    pub heading_deg: f64,
    pub bearing_to_target_deg: f64,
    /// Target bearing relative to the heading, in `[0, 360)`.
    pub relative_deg: f64,
    /// The bucket recorded for this firing.
    pub bucket: i32,
}

/// `true` when `relative_deg` is within `tolerance_deg` of dead ahead.
#[inline]
pub fn is_aligned(relative_deg: f64, tolerance_deg: f64) -> bool {
    relative_deg <= tolerance_deg || relative_deg >= 360.0 - tolerance_deg
}

// ── Tracker ───────────────────────────────────────────────────────────────────

/// Debounced alignment detector.
///
/// Rules, per sample:
///
/// 1. No target: forget the last firing.
/// 2. Aligned and not yet fired (or the heading is more than the re-arm
///    threshold from the last firing): fire and remember `round(heading)`.
/// 3. Not aligned and more than the threshold from the last firing: forget
///    it, so pointing back at the target fires again.
///
/// Holding still on the target never refires.  Distances between headings
/// are measured around the circle, so 359.6° and 0.4° are 0.8° apart.
#[derive(Clone, Debug, Default)]
pub struct HeadingTracker {
    config: AlignmentConfig,
    state:  HeadingAlignmentState,
}

impl HeadingTracker {
    pub fn new(config: AlignmentConfig) -> HeadingResult<Self> {
        config.validate()?;
        Ok(Self { config, state: HeadingAlignmentState::default() })
    }

    /// Feed one sample.  Non-finite headings or bearings are ignored
    /// (a non-finite bearing counts as no target).
    pub fn observe(&mut self, heading_deg: f64, bearing_to_target_deg: Option<f64>) -> Option<AlignmentEvent> {
        if !heading_deg.is_finite() {
            return None;
        }
        let Some(bearing) = bearing_to_target_deg.filter(|b| b.is_finite()) else {
            self.reset();
            return None;
        };

        let relative = normalize_relative_bearing(bearing, heading_deg);
        let moved_away = self
            .state
            .last_fired_bucket
            .is_none_or(|b| angular_difference(heading_deg, f64::from(b)) > self.config.rearm_threshold_deg);

        if !is_aligned(relative, self.config.tolerance_deg) {
            if moved_away && self.state.last_fired_bucket.take().is_some() {
                debug!(heading = heading_deg, "heading alignment re-armed");
            }
            return None;
        }
        if !moved_away {
            return None;
        }

        let bucket = bucket_of(heading_deg);
        self.state.last_fired_bucket = Some(bucket);
        debug!(heading = heading_deg, bearing, relative, bucket, "heading aligned with target");
        Some(AlignmentEvent {
            heading_deg,
            bearing_to_target_deg: bearing,
            relative_deg: relative,
            bucket,
        })
    }

    /// Forget the last firing.  Called when navigation starts or stops.
    pub fn reset(&mut self) {
        self.state = HeadingAlignmentState::default();
    }

    pub fn state(&self) -> HeadingAlignmentState {
        self.state
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// `true` when no firing is remembered, so the next aligned sample fires.
    pub fn is_armed(&self) -> bool {
        self.state.last_fired_bucket.is_none()
    }
}

/// Whole-degree bucket in `0..360`.
fn bucket_of(heading_deg: f64) -> i32 {
    (normalize_degrees(heading_deg).round() as i32).rem_euclid(360)
}
