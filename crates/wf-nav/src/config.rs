//! Session configuration.
//!
//! Every field has a working default, so `NavConfig::default()` is a valid
//! configuration.  Deployments override individual values from the
//! environment with [`NavConfig::from_env`]:
//!
//! | Variable                          | Field                              |
//! |-----------------------------------|------------------------------------|
//! | `WAYFINDER_DEADLINE_MS`           | `resolver.deadline`                |
//! | `WAYFINDER_DRIVE_MPS`             | `speeds.drive_mps`                 |
//! | `WAYFINDER_WALK_MPS`              | `speeds.walk_mps`                  |
//! | `WAYFINDER_TRANSIT_MPS`           | `speeds.transit_mps`               |
//! | `WAYFINDER_TICK_SECS`             | `playback.base_interval_secs`      |
//! | `WAYFINDER_SIM_SPEED_MPS`         | `playback.simulated_speed_mps`     |
//! | `WAYFINDER_ALIGN_TOLERANCE_DEG`   | `alignment.tolerance_deg`          |
//! | `WAYFINDER_REARM_DEG`             | `alignment.rearm_threshold_deg`    |
//! | `WAYFINDER_EVENT_CAPACITY`        | `event_capacity`                   |

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use wf_heading::AlignmentConfig;
use wf_position::PlaybackConfig;
use wf_routing::{FareSchedule, ResolverConfig, SpeedModel};

use crate::{NavError, NavResult};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub resolver:  ResolverConfig,
    pub speeds:    SpeedModel,
    pub fares:     FareSchedule,
    pub playback:  PlaybackConfig,
    pub alignment: AlignmentConfig,
    /// Buffer size of the driver's command channel and of
    /// [`EventBroadcaster`][crate::EventBroadcaster] channels.
    pub event_capacity: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            resolver:       ResolverConfig::default(),
            speeds:         SpeedModel::default(),
            fares:          FareSchedule::default(),
            playback:       PlaybackConfig::default(),
            alignment:      AlignmentConfig::default(),
            event_capacity: 64,
        }
    }
}

impl NavConfig {
    /// Defaults overridden by any `WAYFINDER_*` variables that are set.
    pub fn from_env() -> NavResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> NavResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(ms) = parse::<u64, _>(&lookup, "WAYFINDER_DEADLINE_MS")? {
            cfg.resolver.deadline = Duration::from_millis(ms);
        }
        override_with(&lookup, "WAYFINDER_DRIVE_MPS", &mut cfg.speeds.drive_mps)?;
        override_with(&lookup, "WAYFINDER_WALK_MPS", &mut cfg.speeds.walk_mps)?;
        override_with(&lookup, "WAYFINDER_TRANSIT_MPS", &mut cfg.speeds.transit_mps)?;
        override_with(&lookup, "WAYFINDER_TICK_SECS", &mut cfg.playback.base_interval_secs)?;
        override_with(&lookup, "WAYFINDER_SIM_SPEED_MPS", &mut cfg.playback.simulated_speed_mps)?;
        override_with(&lookup, "WAYFINDER_ALIGN_TOLERANCE_DEG", &mut cfg.alignment.tolerance_deg)?;
        override_with(&lookup, "WAYFINDER_REARM_DEG", &mut cfg.alignment.rearm_threshold_deg)?;
        override_with(&lookup, "WAYFINDER_EVENT_CAPACITY", &mut cfg.event_capacity)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> NavResult<()> {
        self.resolver.validate()?;
        self.speeds.validate()?;
        self.playback.validate()?;
        self.alignment.validate()?;
        if self.event_capacity == 0 {
            return Err(NavError::Config("event_capacity must be > 0".into()));
        }
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> NavResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| NavError::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}

fn override_with<T, F>(lookup: &F, key: &str, slot: &mut T) -> NavResult<()>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = parse(lookup, key)? {
        *slot = v;
    }
    Ok(())
}
