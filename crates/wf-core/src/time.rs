//! Fix timestamp model.
//!
//! # Design
//!
//! Fix timestamps are wall-clock seconds since the Unix epoch, but they are
//! *derived* from a monotonic elapsed duration so that a stream's timestamps
//! can never go backwards when the system clock is adjusted:
//!
//!   timestamp = origin_unix_secs + elapsed.as_secs_f64()
//!
//! The caller owns the monotonic source (`tokio::time::Instant` in the
//! position crate), which keeps this crate runtime-free and lets tests drive
//! time explicitly.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Converts elapsed monotonic time into epoch-second fix timestamps.
///
/// `FixClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixClock {
    /// Unix timestamp (seconds since epoch) corresponding to zero elapsed.
    pub origin_unix_secs: f64,
}

impl FixClock {
    pub fn new(origin_unix_secs: f64) -> Self {
        Self { origin_unix_secs }
    }

    /// A clock whose origin is the current system time.
    ///
    /// A system clock set before 1970 yields origin `0.0`.
    pub fn from_system_time() -> Self {
        let origin = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self::new(origin)
    }

    /// Timestamp for a sample taken `elapsed` after the origin.
    #[inline]
    pub fn timestamp_at(&self, elapsed: Duration) -> f64 {
        self.origin_unix_secs + elapsed.as_secs_f64()
    }
}

impl Default for FixClock {
    fn default() -> Self {
        Self::from_system_time()
    }
}

impl fmt::Display for FixClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixClock(origin={:.3})", self.origin_unix_secs)
    }
}
