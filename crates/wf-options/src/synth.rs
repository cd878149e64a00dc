//! Expands measured base routes into the option menu.

use tracing::{debug, warn};

use wf_core::{BaseRoutes, OptionId, RouteResult, TransportMode};
use wf_routing::FareSchedule;

use crate::{MODE_TABLE, ModeRule, RouteOption, RouteOptionSet};

/// Derives [`RouteOption`]s from [`BaseRoutes`] using [`MODE_TABLE`].
///
/// Synthesis is a pure function of its inputs: the same base routes,
/// request, and starting id always produce the same set.
#[derive(Clone, Debug, Default)]
pub struct RouteOptionSynthesizer {
    fares: FareSchedule,
}

impl RouteOptionSynthesizer {
    pub fn new(fares: FareSchedule) -> Self {
        Self { fares }
    }

    pub fn fares(&self) -> &FareSchedule {
        &self.fares
    }

    /// Build the option set for `requested` modes (every mode if empty),
    /// numbering options from `first_id` and auto-selecting `preferred`.
    ///
    /// A requested mode whose source route is missing from `bases` is
    /// recorded in [`RouteOptionSet::unavailable`] instead of producing an
    /// option.
    pub fn synthesize(
        &self,
        bases:     &BaseRoutes,
        requested: &[TransportMode],
        preferred: Option<TransportMode>,
        first_id:  OptionId,
    ) -> RouteOptionSet {
        let wanted = |mode: TransportMode| requested.is_empty() || requested.contains(&mode);

        let mut options = Vec::new();
        let mut unavailable = Vec::new();
        let mut id = first_id;

        for rule in MODE_TABLE.iter().filter(|r| wanted(r.mode)) {
            match bases.get(rule.source) {
                Some(base) => {
                    options.push(self.derive(rule, base, id));
                    id = id.next();
                }
                None => unavailable.push(rule.mode),
            }
        }

        if !unavailable.is_empty() {
            warn!(?unavailable, "no base route for some requested modes");
        }

        let mut set = RouteOptionSet::new(options, unavailable);
        let chosen = set.auto_select(preferred).map(|o| o.mode);
        debug!(options = set.len(), selected = ?chosen, "route options synthesized");
        set
    }

    fn derive(&self, rule: &ModeRule, base: &RouteResult, id: OptionId) -> RouteOption {
        let ride_share = rule.mode.is_ride_share();
        RouteOption {
            id,
            mode:             rule.mode,
            travel_time_secs: base.travel_time_secs * rule.time_multiplier,
            distance_m:       base.distance_m,
            steps:            if ride_share { Vec::new() } else { base.steps.clone() },
            polyline:         base.coordinates.clone(),
            fare:             rule.fare.map(|p| self.fares.estimate(p, base.distance_m / 1000.0)),
            selected:         false,
        }
    }
}
