//! Transportation mode enum shared across all routing-related crates.
//!
//! The set of modes is closed.  Each mode belongs to a [`BaseModeClass`],
//! the physical category whose measured route it borrows.  Per-mode time
//! multipliers and fares live in `wf-options`' derivation table, not here.

/// A way of getting from A to B that the user can compare and select.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportMode {
    /// Private car.
    Drive,
    /// On foot.
    Walk,
    /// Scheduled public transit.
    Transit,
    /// Bicycle.
    Cycle,
    Motorcycle,
    /// Kick or moped scooter.
    Scooter,
    Ferry,
    /// First ride-share provider (Uber-like pricing).
    RideShareA,
    /// Second ride-share provider (Lyft-like pricing).
    RideShareB,
}

impl TransportMode {
    /// Every mode, in display order.
    pub const ALL: [TransportMode; 9] = [
        TransportMode::Drive,
        TransportMode::Walk,
        TransportMode::Transit,
        TransportMode::Cycle,
        TransportMode::Motorcycle,
        TransportMode::Scooter,
        TransportMode::Ferry,
        TransportMode::RideShareA,
        TransportMode::RideShareB,
    ];

    /// The physical category this mode belongs to.
    pub fn base_class(self) -> BaseModeClass {
        match self {
            TransportMode::Drive
            | TransportMode::Motorcycle
            | TransportMode::Scooter    => BaseModeClass::Drive,
            TransportMode::Walk
            | TransportMode::Cycle      => BaseModeClass::Walk,
            TransportMode::Transit
            | TransportMode::Ferry      => BaseModeClass::Transit,
            TransportMode::RideShareA
            | TransportMode::RideShareB => BaseModeClass::RideShare,
        }
    }

    #[inline]
    pub fn is_ride_share(self) -> bool {
        self.base_class() == BaseModeClass::RideShare
    }

    /// `true` for the three modes a directions provider can compute natively.
    #[inline]
    pub fn is_native(self) -> bool {
        matches!(self, TransportMode::Drive | TransportMode::Walk | TransportMode::Transit)
    }

    /// The native mode to request from a directions provider for this mode's
    /// base route.
    pub fn native_mode(self) -> TransportMode {
        match self.base_class().route_source() {
            BaseModeClass::Walk    => TransportMode::Walk,
            BaseModeClass::Transit => TransportMode::Transit,
            _                      => TransportMode::Drive,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Drive      => "drive",
            TransportMode::Walk       => "walk",
            TransportMode::Transit    => "transit",
            TransportMode::Cycle      => "cycle",
            TransportMode::Motorcycle => "motorcycle",
            TransportMode::Scooter    => "scooter",
            TransportMode::Ferry      => "ferry",
            TransportMode::RideShareA => "rideshare_a",
            TransportMode::RideShareB => "rideshare_b",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical category a derived transport mode borrows its measured route
/// from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseModeClass {
    Drive,
    Walk,
    Transit,
    RideShare,
}

impl BaseModeClass {
    /// The three classes a base `RouteResult` can be measured for.
    pub const MEASURED: [BaseModeClass; 3] =
        [BaseModeClass::Drive, BaseModeClass::Walk, BaseModeClass::Transit];

    /// The class whose measured route this class reuses.  Ride-share trips
    /// follow the drive route.
    #[inline]
    pub fn route_source(self) -> BaseModeClass {
        match self {
            BaseModeClass::RideShare => BaseModeClass::Drive,
            other                    => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BaseModeClass::Drive     => "drive",
            BaseModeClass::Walk      => "walk",
            BaseModeClass::Transit   => "transit",
            BaseModeClass::RideShare => "rideshare",
        }
    }
}

impl std::fmt::Display for BaseModeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
