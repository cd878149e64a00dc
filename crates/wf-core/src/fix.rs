//! Position samples.

use crate::Coordinate;

/// One timestamped position sample, live or simulated.
///
/// Within one stream, `timestamp_secs` is strictly increasing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fix {
    pub coordinate: Coordinate,
    /// Direction of travel, clockwise from true north, in `[0, 360)`.
    pub course_deg: f64,
    pub speed_mps: f64,
    /// Seconds since the Unix epoch.
    pub timestamp_secs: f64,
}

/// Where a fix came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixOrigin {
    /// Platform location source (GPS).
    Live,
    /// Route playback.
    Simulated,
}

impl std::fmt::Display for FixOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FixOrigin::Live      => "live",
            FixOrigin::Simulated => "simulated",
        })
    }
}
