//! Nominal travel speeds used for straight-line ETAs.
//!
//! | Class      | Speed     |
//! |------------|-----------|
//! | Drive      | 13.8 m/s  (~50 km/h urban) |
//! | Walk       | 1.4 m/s   |
//! | Transit    | 8.3 m/s   |
//! | RideShare  | drive speed |

use wf_core::BaseModeClass;

use crate::{RoutingError, RoutingResult};

/// Per-class nominal speeds in metres per second.
///
/// This is the single source of truth for straight-line travel-time
/// estimates.  Derived modes scale these through their time multipliers in
/// `wf-options`; they never carry a speed of their own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedModel {
    pub drive_mps:   f64,
    pub walk_mps:    f64,
    pub transit_mps: f64,
}

impl SpeedModel {
    pub const DRIVE_MPS:   f64 = 13.8;
    pub const WALK_MPS:    f64 = 1.4;
    pub const TRANSIT_MPS: f64 = 8.3;

    /// Nominal speed for `class`.  Ride-share travels at drive speed.
    #[inline]
    pub fn nominal_speed_mps(&self, class: BaseModeClass) -> f64 {
        match class {
            BaseModeClass::Drive | BaseModeClass::RideShare => self.drive_mps,
            BaseModeClass::Walk                             => self.walk_mps,
            BaseModeClass::Transit                          => self.transit_mps,
        }
    }

    /// Straight-line travel time in seconds over `distance_m`.
    #[inline]
    pub fn travel_time_secs(&self, class: BaseModeClass, distance_m: f64) -> f64 {
        distance_m / self.nominal_speed_mps(class)
    }

    /// Every speed must be finite and strictly positive.
    pub fn validate(&self) -> RoutingResult<()> {
        for (name, v) in [
            ("drive_mps", self.drive_mps),
            ("walk_mps", self.walk_mps),
            ("transit_mps", self.transit_mps),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(RoutingError::Config(format!("{name} must be > 0, got {v}")));
            }
        }
        Ok(())
    }
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            drive_mps:   Self::DRIVE_MPS,
            walk_mps:    Self::WALK_MPS,
            transit_mps: Self::TRANSIT_MPS,
        }
    }
}
