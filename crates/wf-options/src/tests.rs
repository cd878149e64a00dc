//! Unit tests for wf-options.

use wf_core::{BaseModeClass, BaseRoutes, Coordinate, Instruction, OptionId, RouteResult, TransportMode};
use wf_routing::FareSchedule;

use crate::{OptionsError, RouteOptionSet, RouteOptionSynthesizer, MODE_TABLE};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn base(distance_m: f64, travel_time_secs: f64) -> RouteResult {
    RouteResult {
        coordinates: vec![
            Coordinate::new(37.7955, -122.3937),
            Coordinate::new(37.7990, -122.3990),
            Coordinate::new(37.8024, -122.4058),
        ],
        steps: vec![Instruction::new("Head north"), Instruction::new("")],
        travel_time_secs,
        distance_m,
    }
}

fn all_bases() -> BaseRoutes {
    let mut bases = BaseRoutes::new();
    bases.insert(BaseModeClass::Drive, base(10_000.0, 724.0));
    bases.insert(BaseModeClass::Walk, base(2_000.0, 1_500.0));
    bases.insert(BaseModeClass::Transit, base(5_000.0, 900.0));
    bases
}

fn synth(bases: &BaseRoutes, requested: &[TransportMode], preferred: Option<TransportMode>) -> RouteOptionSet {
    RouteOptionSynthesizer::default().synthesize(bases, requested, preferred, OptionId(0))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use super::*;
    use crate::{rule_for, time_multiplier};

    #[test]
    fn every_mode_has_exactly_one_rule() {
        for mode in TransportMode::ALL {
            assert_eq!(MODE_TABLE.iter().filter(|r| r.mode == mode).count(), 1, "{mode}");
        }
    }

    #[test]
    fn sources_match_base_class() {
        for rule in &MODE_TABLE {
            assert_eq!(rule.source, rule.mode.base_class().route_source(), "{}", rule.mode);
        }
    }

    #[test]
    fn only_ride_share_carries_a_fare() {
        for rule in &MODE_TABLE {
            assert_eq!(rule.fare.is_some(), rule.mode.is_ride_share(), "{}", rule.mode);
        }
    }

    #[test]
    fn multipliers() {
        assert_eq!(time_multiplier(TransportMode::Motorcycle), Some(0.85));
        assert_eq!(time_multiplier(TransportMode::Cycle), Some(0.35));
        assert_eq!(time_multiplier(TransportMode::Ferry), Some(1.5));
        assert_eq!(rule_for(TransportMode::Walk).map(|r| r.source), Some(BaseModeClass::Walk));
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod synthesis {
    use super::*;

    #[test]
    fn drive_derivations_scale_time_only() {
        let set = synth(&all_bases(), &[], None);

        let moto = set.find_mode(TransportMode::Motorcycle).unwrap();
        assert!(approx(moto.travel_time_secs, 724.0 * 0.85));
        assert_eq!(moto.distance_m, 10_000.0);

        let scooter = set.find_mode(TransportMode::Scooter).unwrap();
        assert!(approx(scooter.travel_time_secs, 724.0 * 1.3));
        assert_eq!(scooter.distance_m, 10_000.0);
        assert_eq!(scooter.steps.len(), 2);
    }

    #[test]
    fn walk_and_transit_derivations() {
        let set = synth(&all_bases(), &[], None);
        let cycle = set.find_mode(TransportMode::Cycle).unwrap();
        assert!(approx(cycle.travel_time_secs, 1_500.0 * 0.35));
        assert_eq!(cycle.distance_m, 2_000.0);

        let ferry = set.find_mode(TransportMode::Ferry).unwrap();
        assert!(approx(ferry.travel_time_secs, 900.0 * 1.5));
        assert_eq!(ferry.distance_m, 5_000.0);
    }

    #[test]
    fn ride_share_fare_and_no_steps() {
        let set = synth(&all_bases(), &[], None);
        let a = set.find_mode(TransportMode::RideShareA).unwrap();

        assert!(a.steps.is_empty());
        assert_eq!(a.polyline.len(), 3);
        assert!(approx(a.travel_time_secs, 724.0 * 1.15));

        let fare = a.fare.unwrap();
        assert!(approx(fare.low_usd, 14.875));
        assert!(approx(fare.high_usd, 23.625));
        assert_eq!(a.fare_display().as_deref(), Some("$14–$23"));

        let b = set.find_mode(TransportMode::RideShareB).unwrap();
        assert!(b.fare.is_some());
        assert!(set.find_mode(TransportMode::Drive).unwrap().fare.is_none());
    }

    #[test]
    fn custom_fare_schedule_is_used() {
        let mut fares = FareSchedule::default();
        fares.uber_like.base_usd = 10.0;
        let set = RouteOptionSynthesizer::new(fares)
            .synthesize(&all_bases(), &[TransportMode::RideShareA], None, OptionId(0));
        let fare = set.options()[0].fare.unwrap();
        assert!(approx(fare.high_usd, 25.0 * 1.35));
    }

    #[test]
    fn empty_request_means_every_mode_in_table_order() {
        let set = synth(&all_bases(), &[], None);
        assert_eq!(set.len(), 9);
        let modes: Vec<_> = set.iter().map(|o| o.mode).collect();
        let table: Vec<_> = MODE_TABLE.iter().map(|r| r.mode).collect();
        assert_eq!(modes, table);
        assert!(set.unavailable().is_empty());
    }

    #[test]
    fn ids_are_sequential_from_first_id() {
        let set = RouteOptionSynthesizer::default()
            .synthesize(&all_bases(), &[], None, OptionId(40));
        let ids: Vec<u32> = set.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, (40..49).collect::<Vec<_>>());
        assert_eq!(set.next_id(), OptionId(49));
    }

    #[test]
    fn missing_base_marks_modes_unavailable() {
        let mut bases = BaseRoutes::new();
        bases.insert(BaseModeClass::Drive, base(10_000.0, 724.0));

        let set = synth(&bases, &[TransportMode::Drive, TransportMode::Ferry, TransportMode::Cycle], None);
        assert_eq!(set.len(), 1);
        assert_eq!(set.unavailable(), &[TransportMode::Cycle, TransportMode::Ferry]);
    }

    #[test]
    fn no_bases_gives_empty_set() {
        let set = synth(&BaseRoutes::new(), &[], Some(TransportMode::Walk));
        assert!(set.is_empty());
        assert_eq!(set.unavailable().len(), 9);
        assert!(set.selected().is_none());
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selection {
    use super::*;

    #[test]
    fn auto_select_prefers_requested_mode() {
        let set = synth(&all_bases(), &[], Some(TransportMode::Ferry));
        assert_eq!(set.selected().map(|o| o.mode), Some(TransportMode::Ferry));
        assert_eq!(set.selected_count(), 1);
    }

    #[test]
    fn auto_select_falls_back_to_drive() {
        let set = synth(&all_bases(), &[TransportMode::Walk, TransportMode::Drive], Some(TransportMode::Ferry));
        assert_eq!(set.selected().map(|o| o.mode), Some(TransportMode::Drive));
    }

    #[test]
    fn auto_select_falls_back_to_first() {
        let set = synth(&all_bases(), &[TransportMode::Cycle, TransportMode::Walk], None);
        assert_eq!(set.selected().map(|o| o.mode), Some(TransportMode::Walk));
        assert_eq!(set.selected_count(), 1);
    }

    #[test]
    fn select_is_total_replace() {
        let mut set = synth(&all_bases(), &[], None);
        for option in set.options().to_vec() {
            let picked = set.select(option.id).unwrap();
            assert_eq!(picked.id, option.id);
            assert_eq!(set.selected_count(), 1);
            assert_eq!(set.selected().map(|o| o.id), Some(option.id));
        }
    }

    #[test]
    fn selecting_twice_keeps_one_selected() {
        let mut set = synth(&all_bases(), &[], None);
        let id = set.find_mode(TransportMode::Walk).unwrap().id;
        set.select(id).unwrap();
        set.select(id).unwrap();
        assert_eq!(set.selected_count(), 1);
    }

    #[test]
    fn unknown_id_leaves_selection_unchanged() {
        let mut set = synth(&all_bases(), &[], None);
        let before = set.selected().map(|o| o.id);

        let err = set.select(OptionId(999)).unwrap_err();
        assert_eq!(err, OptionsError::UnknownOption(OptionId(999)));
        assert_eq!(set.selected().map(|o| o.id), before);
        assert_eq!(set.selected_count(), 1);
    }

    #[test]
    fn select_mode() {
        let mut set = synth(&all_bases(), &[TransportMode::Drive, TransportMode::Walk], None);
        assert_eq!(set.select_mode(TransportMode::Walk).unwrap().mode, TransportMode::Walk);
        assert_eq!(set.selected_count(), 1);

        let err = set.select_mode(TransportMode::Ferry).unwrap_err();
        assert_eq!(err, OptionsError::UnsupportedMode(TransportMode::Ferry));
        assert_eq!(set.selected().map(|o| o.mode), Some(TransportMode::Walk));
    }
}
