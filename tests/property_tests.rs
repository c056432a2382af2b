//! Property-based tests for the pace engine's mathematical laws

use proptest::prelude::*;
use vdotrs::paces::pace_per_mile;
use vdotrs::splits::split_seconds;
use vdotrs::time_codec::{format_duration, parse_duration};
use vdotrs::units::Unit;
use vdotrs::vdot::{estimate_vdot, project_time, try_project_time};
use vdotrs::zones::Zone;

proptest! {
    #[test]
    fn test_format_parse_round_trip(minutes in 0u32..600, seconds in 0u32..60) {
        let total = (minutes * 60 + seconds) as f64;
        prop_assert_eq!(parse_duration(&format_duration(total, false)), total);
    }

    #[test]
    fn test_faster_time_means_higher_vdot(
        distance in 400.0f64..42195.0,
        t1 in 60.0f64..20000.0,
        delta in 1.0f64..600.0
    ) {
        let t2 = t1 + delta;
        prop_assert!(estimate_vdot(distance, t1) > estimate_vdot(distance, t2));
    }

    #[test]
    fn test_projection_inverts_estimate(vdot in 30.0f64..70.0, distance in 400.0f64..10000.0) {
        let seconds = project_time(vdot, distance);
        let recovered = estimate_vdot(distance, seconds);
        prop_assert!((recovered - vdot).abs() < 0.5, "vdot {} recovered {}", vdot, recovered);
    }

    #[test]
    fn test_strict_projection_is_never_a_bracket_edge(
        vdot in 4.0f64..85.0,
        distance in 200.0f64..42195.0
    ) {
        if let Ok(seconds) = try_project_time(vdot, distance) {
            let recovered = estimate_vdot(distance, seconds);
            prop_assert!((recovered - vdot).abs() < 0.01, "vdot {} recovered {}", vdot, recovered);
        }
    }

    #[test]
    fn test_zone_paces_strictly_faster(vdot in 30.0f64..80.0) {
        let paces: Vec<f64> = Zone::ALL.iter().map(|&zone| pace_per_mile(zone, vdot)).collect();
        for pair in paces.windows(2) {
            prop_assert!(pair[0] > pair[1], "{:?}", paces);
        }
    }

    #[test]
    fn test_mile_and_meter_splits_agree(vdot in 20.0f64..80.0, zone_index in 0usize..11) {
        let zone = Zone::ALL[zone_index];
        let meters = split_seconds(1609.34, Unit::Meters, zone, vdot);
        let miles = split_seconds(1.0, Unit::Miles, zone, vdot);
        prop_assert!((meters - miles).abs() < 1e-9);
    }

    #[test]
    fn test_format_never_panics(seconds in proptest::num::f64::ANY, tenths in any::<bool>()) {
        let text = format_duration(seconds, tenths);
        prop_assert!(!text.is_empty());
    }

    #[test]
    fn test_parse_never_panics(text in ".*") {
        let seconds = parse_duration(&text);
        prop_assert!(seconds >= 0.0);
    }
}
