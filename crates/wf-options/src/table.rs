//! The per-mode derivation table.

use wf_core::{BaseModeClass, TransportMode};
use wf_routing::FareProvider;

/// How one transport mode is derived from a measured base route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModeRule {
    pub mode: TransportMode,
    /// The measured route this mode reuses.
    pub source: BaseModeClass,
    /// Scale applied to the source route's travel time.
    pub time_multiplier: f64,
    /// Pricing family, for ride-share modes only.
    pub fare: Option<FareProvider>,
}

/// Every mode's derivation rule, in display order.
pub static MODE_TABLE: [ModeRule; 9] = [
    rule(TransportMode::Drive,      BaseModeClass::Drive,   1.0,  None),
    rule(TransportMode::Motorcycle, BaseModeClass::Drive,   0.85, None),
    rule(TransportMode::Scooter,    BaseModeClass::Drive,   1.3,  None),
    rule(TransportMode::RideShareA, BaseModeClass::Drive,   1.15, Some(FareProvider::UberLike)),
    rule(TransportMode::RideShareB, BaseModeClass::Drive,   1.15, Some(FareProvider::LyftLike)),
    rule(TransportMode::Walk,       BaseModeClass::Walk,    1.0,  None),
    rule(TransportMode::Cycle,      BaseModeClass::Walk,    0.35, None),
    rule(TransportMode::Transit,    BaseModeClass::Transit, 1.0,  None),
    rule(TransportMode::Ferry,      BaseModeClass::Transit, 1.5,  None),
];

const fn rule(
    mode:            TransportMode,
    source:          BaseModeClass,
    time_multiplier: f64,
    fare:            Option<FareProvider>,
) -> ModeRule {
    ModeRule { mode, source, time_multiplier, fare }
}

/// The derivation rule for `mode`, if it has one.
pub fn rule_for(mode: TransportMode) -> Option<&'static ModeRule> {
    MODE_TABLE.iter().find(|r| r.mode == mode)
}

/// Travel-time multiplier of `mode` relative to its source route.
pub fn time_multiplier(mode: TransportMode) -> Option<f64> {
    rule_for(mode).map(|r| r.time_multiplier)
}
