//! A single displayable travel option.

use wf_core::{Coordinate, Instruction, OptionId, TransportMode};
use wf_routing::FareEstimate;

/// One entry of the option menu.
///
/// Options are derived values: they are rebuilt whenever the base routes
/// change and never edited in place.  Only [`RouteOptionSet`][crate::RouteOptionSet]
/// touches `selected`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteOption {
    pub id:               OptionId,
    pub mode:             TransportMode,
    pub travel_time_secs: f64,
    pub distance_m:       f64,
    /// Turn-by-turn steps.  Empty for ride-share modes.
    pub steps:            Vec<Instruction>,
    pub polyline:         Vec<Coordinate>,
    pub fare:             Option<FareEstimate>,
    pub selected:         bool,
}

impl RouteOption {
    /// Fare range as display text, e.g. `"$14–$23"`.
    pub fn fare_display(&self) -> Option<String> {
        self.fare.map(|f| f.display())
    }
}
