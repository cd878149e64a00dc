//! Geographic coordinate type and geodesic utilities.
//!
//! Everything here assumes a spherical Earth of radius 6 371 000 m.  That is
//! accurate to a few tenths of a percent, which is well inside the error of a
//! consumer GPS fix and of any straight-line ETA built on top of it.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude:  f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Construct without validation.  Use [`Coordinate::try_new`] for
    /// untrusted input.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Construct a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        let c = Self::new(latitude, longitude);
        c.validate()?;
        Ok(c)
    }

    /// `true` if both components are finite and within their ranges.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn validate(self) -> CoreResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CoreError::InvalidCoordinate { lat: self.latitude, lon: self.longitude })
        }
    }

    /// Haversine great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> f64 {
        distance_meters(self, other)
    }

    /// Initial bearing from `self` towards `other`, in `[0, 360)`.
    #[inline]
    pub fn bearing_to(self, other: Coordinate) -> f64 {
        initial_bearing_degrees(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Haversine great-circle distance in metres.
///
/// Symmetric in its arguments and exactly `0.0` for identical points.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Forward azimuth from `from` to `to`, clockwise from true north, in
/// `[0, 360)`.
///
/// The result is meaningless (but finite, typically `0.0`) when
/// `from == to`; callers that can see identical points must guard.
pub fn initial_bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wrap any finite angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = ((deg % 360.0) + 360.0) % 360.0;
    // `-1e-15 % 360 + 360` rounds to exactly 360.0.
    if r >= 360.0 { 0.0 } else { r }
}

/// Bearing of `target` relative to the current `heading`, in `[0, 360)`.
///
/// `0` means dead ahead; `90` means the target is to the right.
#[inline]
pub fn normalize_relative_bearing(target: f64, heading: f64) -> f64 {
    normalize_degrees(target - heading)
}

/// Smallest unsigned angle between two directions, in `[0, 180]`.
///
/// `angular_difference(359.0, 1.0) == 2.0`.
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Short human-readable distance: `"850m"` below one kilometre, otherwise
/// `"1.3 km"`.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.max(0.0) as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
