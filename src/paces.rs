//! Training pace derivation
//!
//! Turns a 5K time (or a known VDOT) into per-mile paces for every zone. The
//! reference pace is the projected 5K pace in seconds per meter; training
//! zones divide it by their velocity fraction, race zones use the projected
//! time for their own distance.

use crate::time_codec::{format_duration, parse_duration};
use crate::units::METERS_PER_MILE;
use crate::vdot::{estimate_vdot, project_time};
use crate::zones::{Zone, ZoneSpec};
use serde::{Deserialize, Serialize};

/// Distance the reference pace is projected over
pub const REFERENCE_DISTANCE_METERS: f64 = 5000.0;

/// VDOT plus formatted per-mile paces for every zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceReport {
    pub vdot: f64,
    /// Range, fast then slow
    pub recovery: String,
    /// Range, fast then slow
    pub foundation: String,
    pub steady: String,
    pub tempo: String,
    pub threshold: String,
    pub cv: String,
    #[serde(rename = "race5k")]
    pub race_5k: String,
    #[serde(rename = "race3200")]
    pub race_3200: String,
    #[serde(rename = "race1600")]
    pub race_1600: String,
    #[serde(rename = "race800")]
    pub race_800: String,
    #[serde(rename = "race400")]
    pub race_400: String,
}

impl PaceReport {
    /// Formatted pace for a zone
    pub fn pace(&self, zone: Zone) -> &str {
        match zone {
            Zone::Recovery => &self.recovery,
            Zone::Foundation => &self.foundation,
            Zone::Steady => &self.steady,
            Zone::Tempo => &self.tempo,
            Zone::Threshold => &self.threshold,
            Zone::Cv => &self.cv,
            Zone::Race5k => &self.race_5k,
            Zone::Race3200 => &self.race_3200,
            Zone::Race1600 => &self.race_1600,
            Zone::Race800 => &self.race_800,
            Zone::Race400 => &self.race_400,
        }
    }

    /// `(zone, pace)` pairs, slowest zone first
    pub fn entries(&self) -> impl Iterator<Item = (Zone, &str)> + '_ {
        Zone::ALL.into_iter().map(move |zone| (zone, self.pace(zone)))
    }
}

/// Projected 5K pace in seconds per meter
pub fn reference_pace(vdot: f64) -> f64 {
    project_time(vdot, REFERENCE_DISTANCE_METERS) / REFERENCE_DISTANCE_METERS
}

/// Pace in seconds per meter for `zone`, using the band midpoint for training zones
pub fn pace_per_meter(zone: Zone, vdot: f64) -> f64 {
    match zone.spec() {
        ZoneSpec::Training {
            slow_factor,
            fast_factor,
        } => reference_pace(vdot) / ((slow_factor + fast_factor) / 2.0),
        ZoneSpec::Race { distance_meters } => {
            project_time(vdot, distance_meters) / distance_meters
        }
    }
}

/// Pace in seconds per mile for `zone`
pub fn pace_per_mile(zone: Zone, vdot: f64) -> f64 {
    pace_per_meter(zone, vdot) * METERS_PER_MILE
}

/// Derive the full pace report from a 5K time such as `"20:00"`.
///
/// Malformed text is treated as a zero time, which yields VDOT 0 and a
/// degenerate but well-formed report.
pub fn derive_paces(five_k_time: &str) -> PaceReport {
    let seconds = parse_duration(five_k_time);
    let vdot = estimate_vdot(REFERENCE_DISTANCE_METERS, seconds);
    derive_paces_from_vdot(vdot)
}

/// Derive the full pace report for a known VDOT
pub fn derive_paces_from_vdot(vdot: f64) -> PaceReport {
    let reference = reference_pace(vdot);

    let single = |zone: Zone| format_duration(pace_per_mile(zone, vdot), false);
    let range = |zone: Zone| match zone.spec() {
        ZoneSpec::Training {
            slow_factor,
            fast_factor,
        } => format!(
            "{} - {}",
            format_duration(reference / fast_factor * METERS_PER_MILE, false),
            format_duration(reference / slow_factor * METERS_PER_MILE, false)
        ),
        ZoneSpec::Race { .. } => single(zone),
    };

    PaceReport {
        vdot,
        recovery: range(Zone::Recovery),
        foundation: range(Zone::Foundation),
        steady: single(Zone::Steady),
        tempo: single(Zone::Tempo),
        threshold: single(Zone::Threshold),
        cv: single(Zone::Cv),
        race_5k: single(Zone::Race5k),
        race_3200: single(Zone::Race3200),
        race_1600: single(Zone::Race1600),
        race_800: single(Zone::Race800),
        race_400: single(Zone::Race400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_minute_5k_report() {
        let report = derive_paces("20:00");

        assert!((report.vdot - 49.806).abs() < 0.001);
        assert_eq!(report.recovery, "9:19 - 10:13");
        assert_eq!(report.foundation, "8:02 - 9:11");
        assert_eq!(report.steady, "7:48");
        assert_eq!(report.tempo, "7:18");
        assert_eq!(report.threshold, "6:57");
        assert_eq!(report.cv, "6:42");
        assert_eq!(report.race_5k, "6:26");
        assert_eq!(report.race_3200, "6:14");
        assert_eq!(report.race_1600, "5:50");
        assert_eq!(report.race_800, "5:29");
        assert_eq!(report.race_400, "5:16");
    }

    #[test]
    fn test_garbage_input_is_degenerate_but_valid() {
        let report = derive_paces("garbage");
        assert_eq!(report.vdot, 0.0);
        for (zone, pace) in report.entries() {
            assert!(!pace.is_empty(), "{} pace empty", zone);
            assert_ne!(pace, "N/A", "{} pace not finite", zone);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(derive_paces("18:45"), derive_paces("18:45"));
    }

    #[test]
    fn test_paces_speed_up_across_zones() {
        let vdot = 45.0;
        let paces: Vec<f64> = Zone::ALL.iter().map(|&z| pace_per_mile(z, vdot)).collect();
        for pair in paces.windows(2) {
            assert!(pair[0] > pair[1], "{:?}", paces);
        }
    }

    #[test]
    fn test_from_vdot_matches_from_time() {
        let from_time = derive_paces("22:30");
        let from_vdot = derive_paces_from_vdot(from_time.vdot);
        assert_eq!(from_time, from_vdot);
    }

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let json = serde_json::to_value(derive_paces("20:00")).unwrap();
        assert_eq!(json["race5k"], "6:26");
        assert_eq!(json["race400"], "5:16");
        assert_eq!(json["foundation"], "8:02 - 9:11");
        assert!(json["vdot"].as_f64().unwrap() > 49.0);
    }
}
