//! Unit tests for wf-heading.

use crate::{AlignmentConfig, HeadingError, HeadingTracker, is_aligned};

fn tracker() -> HeadingTracker {
    HeadingTracker::default()
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults() {
        let c = AlignmentConfig::default();
        assert_eq!(c.tolerance_deg, 1.0);
        assert_eq!(c.rearm_threshold_deg, 2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let c = AlignmentConfig { tolerance_deg: 180.0, ..Default::default() };
        assert_eq!(HeadingTracker::new(c).unwrap_err(), HeadingError::InvalidTolerance(180.0));

        let c = AlignmentConfig { rearm_threshold_deg: -1.0, ..Default::default() };
        assert_eq!(HeadingTracker::new(c).unwrap_err(), HeadingError::InvalidThreshold(-1.0));
    }
}

// ── Alignment window ──────────────────────────────────────────────────────────

#[cfg(test)]
mod window {
    use super::*;

    #[test]
    fn within_one_degree_either_side() {
        assert!(is_aligned(0.0, 1.0));
        assert!(is_aligned(1.0, 1.0));
        assert!(is_aligned(359.0, 1.0));
        assert!(!is_aligned(1.5, 1.0));
        assert!(!is_aligned(358.5, 1.0));
        assert!(!is_aligned(180.0, 1.0));
    }

    #[test]
    fn wraps_across_north() {
        let mut t = tracker();
        let ev = t.observe(359.5, Some(0.3)).unwrap();
        assert!((ev.relative_deg - 0.8).abs() < 1e-9);
        assert_eq!(ev.bucket, 0);
    }
}

// ── Hysteresis ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hysteresis {
    use super::*;

    #[test]
    fn fires_once_while_held_on_target() {
        let mut t = tracker();
        let ev = t.observe(45.0, Some(45.0)).unwrap();
        assert_eq!(ev.bucket, 45);
        assert_eq!(ev.heading_deg, 45.0);
        assert_eq!(ev.bearing_to_target_deg, 45.0);

        for _ in 0..10 {
            assert!(t.observe(45.0, Some(45.0)).is_none());
        }
        assert!(t.observe(45.8, Some(45.0)).is_none());
        assert!(t.observe(44.2, Some(45.0)).is_none());
    }

    #[test]
    fn refires_after_moving_away_and_back() {
        let mut t = tracker();
        assert!(t.observe(45.0, Some(45.0)).is_some());

        assert!(t.observe(50.0, Some(45.0)).is_none());
        assert!(t.is_armed());
        assert!(t.observe(45.0, Some(45.0)).is_some());
    }

    #[test]
    fn small_wobble_does_not_rearm() {
        let mut t = tracker();
        assert!(t.observe(45.0, Some(45.0)).is_some());

        // Off target but only 1.5° from the bucket.
        assert!(t.observe(46.5, Some(45.0)).is_none());
        assert!(!t.is_armed());
        assert!(t.observe(45.0, Some(45.0)).is_none());
    }

    #[test]
    fn moving_target_refires_when_far_from_bucket() {
        let mut t = tracker();
        assert!(t.observe(10.0, Some(10.0)).is_some());
        let ev = t.observe(20.0, Some(20.0)).unwrap();
        assert_eq!(ev.bucket, 20);
    }

    #[test]
    fn custom_threshold() {
        let cfg = AlignmentConfig { tolerance_deg: 1.0, rearm_threshold_deg: 10.0 };
        let mut t = HeadingTracker::new(cfg).unwrap();
        assert!(t.observe(90.0, Some(90.0)).is_some());
        assert!(t.observe(95.0, Some(90.0)).is_none());
        assert!(t.observe(90.0, Some(90.0)).is_none());
        assert!(t.observe(105.0, Some(90.0)).is_none());
        assert!(t.observe(90.0, Some(90.0)).is_some());
    }

    #[test]
    fn no_target_resets() {
        let mut t = tracker();
        assert!(t.observe(45.0, Some(45.0)).is_some());
        assert!(t.observe(45.0, None).is_none());
        assert_eq!(t.state().last_fired_bucket, None);
        assert!(t.observe(45.0, Some(45.0)).is_some());
    }

    #[test]
    fn reset_rearms() {
        let mut t = tracker();
        t.observe(45.0, Some(45.0));
        t.reset();
        assert!(t.observe(45.0, Some(45.0)).is_some());
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut t = tracker();
        assert!(t.observe(f64::NAN, Some(45.0)).is_none());
        assert!(t.is_armed());

        assert!(t.observe(45.0, Some(45.0)).is_some());
        assert!(t.observe(f64::INFINITY, Some(45.0)).is_none());
        assert_eq!(t.state().last_fired_bucket, Some(45));

        // Non-finite bearing is treated as no target.
        assert!(t.observe(45.0, Some(f64::NAN)).is_none());
        assert!(t.is_armed());
    }
}
