//! Route results as produced by a route agent.

use crate::{BaseModeClass, Coordinate, CoreError, CoreResult};

/// One human-readable turn instruction.
///
/// An empty `text` means "continue straight".  The core passes it through
/// unchanged; display layers pick their own wording for it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub text: String,
}

impl Instruction {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// `true` for the "continue straight" sentinel.
    #[inline]
    pub fn is_continue(&self) -> bool {
        self.text.is_empty()
    }
}

/// The result of a routing query: a polyline, its turn instructions, and
/// the measured travel time and distance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Path vertices in travel order.  At least two.
    pub coordinates: Vec<Coordinate>,
    pub steps: Vec<Instruction>,
    pub travel_time_secs: f64,
    pub distance_m: f64,
}

impl RouteResult {
    /// Check the structural invariants: at least two valid coordinates,
    /// finite non-negative time and distance, and a positive travel time
    /// unless the route has zero length.
    pub fn validate(&self) -> CoreResult<()> {
        if self.coordinates.len() < 2 {
            return Err(CoreError::DegenerateRoute(self.coordinates.len()));
        }
        for c in &self.coordinates {
            c.validate()?;
        }
        check_measurement("travel time", self.travel_time_secs)?;
        check_measurement("distance", self.distance_m)?;
        if self.travel_time_secs == 0.0 && self.distance_m > 0.0 {
            return Err(CoreError::ZeroTravelTime { distance_m: self.distance_m });
        }
        Ok(())
    }

    /// First vertex of the polyline.
    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    /// Last vertex of the polyline.
    pub fn end(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }

    /// Average speed in m/s, or `None` for a zero-duration route.
    pub fn average_speed_mps(&self) -> Option<f64> {
        (self.travel_time_secs > 0.0).then(|| self.distance_m / self.travel_time_secs)
    }
}

fn check_measurement(what: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidMeasurement { what, value })
    }
}

/// Up to one measured route per base class: the input to option synthesis.
///
/// Ride-share has no slot of its own; it reads the drive route.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseRoutes {
    pub drive:   Option<RouteResult>,
    pub walk:    Option<RouteResult>,
    pub transit: Option<RouteResult>,
}

impl BaseRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The measured route for `class` (ride-share maps to drive).
    pub fn get(&self, class: BaseModeClass) -> Option<&RouteResult> {
        match class.route_source() {
            BaseModeClass::Walk    => self.walk.as_ref(),
            BaseModeClass::Transit => self.transit.as_ref(),
            _                      => self.drive.as_ref(),
        }
    }

    /// Store `route` as the measured route for `class`, replacing any
    /// previous one.
    pub fn insert(&mut self, class: BaseModeClass, route: RouteResult) {
        let slot = match class.route_source() {
            BaseModeClass::Walk    => &mut self.walk,
            BaseModeClass::Transit => &mut self.transit,
            _                      => &mut self.drive,
        };
        *slot = Some(route);
    }

    pub fn is_empty(&self) -> bool {
        self.drive.is_none() && self.walk.is_none() && self.transit.is_none()
    }
}
