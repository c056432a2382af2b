//! Interval split calculation
//!
//! A split is the target elapsed time for one interval (distance at a zone).
//! This is the call made once per interval per athlete when a workout is
//! rendered, so it stays a cheap pure function of its inputs.

use crate::paces::pace_per_meter;
use crate::time_codec::format_duration;
use crate::units::{Distance, Unit, METERS_PER_MILE};
use crate::zones::Zone;
use serde::{Deserialize, Deserializer, Serialize};

/// Splits shorter than this many seconds are shown to the tenth
pub const TENTHS_THRESHOLD_SECONDS: f64 = 180.0;

/// Interval distances (meters) shown in the split matrix by default
pub const DEFAULT_MATRIX_DISTANCES: [f64; 7] =
    [200.0, 300.0, 400.0, 600.0, 800.0, 1000.0, 1609.0];

/// Zones shown in the split matrix by default
pub const DEFAULT_MATRIX_ZONES: [Zone; 8] = [
    Zone::Steady,
    Zone::Tempo,
    Zone::Threshold,
    Zone::Cv,
    Zone::Race5k,
    Zone::Race3200,
    Zone::Race1600,
    Zone::Race800,
];

/// Predicted time in seconds for `distance` `unit` at `zone` for an athlete at `vdot`
pub fn split_seconds(distance: f64, unit: Unit, zone: Zone, vdot: f64) -> f64 {
    let meters = Distance::new(distance, unit).to_meters();
    pace_per_meter(zone, vdot) * meters
}

/// Format a split, with tenths only for efforts under [`TENTHS_THRESHOLD_SECONDS`]
pub fn format_split(seconds: f64) -> String {
    format_duration(seconds, seconds < TENTHS_THRESHOLD_SECONDS)
}

/// Predicted split for an interval, formatted for display
pub fn calculate_split(distance: f64, unit: Unit, zone: Zone, vdot: f64) -> String {
    format_split(split_seconds(distance, unit, zone, vdot))
}

/// String-keyed variant of [`calculate_split`].
///
/// Unrecognized zone names use [`Zone::FALLBACK`] (Foundation) rather than
/// failing; a warning is logged so the caller's bad name is visible.
pub fn calculate_split_by_name(distance: f64, unit: Unit, zone_name: &str, vdot: f64) -> String {
    calculate_split(distance, unit, Zone::from_name_or_fallback(zone_name), vdot)
}

/// One interval of a structured workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSpec {
    pub distance: f64,
    pub unit: Unit,
    #[serde(deserialize_with = "zone_or_fallback")]
    pub zone: Zone,
    #[serde(default = "default_reps")]
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
}

fn default_reps() -> u32 {
    1
}

fn zone_or_fallback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Zone, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(Zone::from_name_or_fallback(&name))
}

impl IntervalSpec {
    pub fn new(distance: f64, unit: Unit, zone: Zone, reps: u32) -> Self {
        Self {
            distance,
            unit,
            zone,
            reps,
            recovery: None,
        }
    }

    pub fn with_recovery(mut self, recovery: impl Into<String>) -> Self {
        self.recovery = Some(recovery.into());
        self
    }

    pub fn split_seconds(&self, vdot: f64) -> f64 {
        split_seconds(self.distance, self.unit, self.zone, vdot)
    }

    pub fn split(&self, vdot: f64) -> String {
        calculate_split(self.distance, self.unit, self.zone, vdot)
    }

    /// Total distance of all reps in miles
    pub fn volume_miles(&self) -> f64 {
        Distance::new(self.distance * self.reps as f64, self.unit).to_miles()
    }

    /// e.g. `6 x 800m`
    pub fn label(&self) -> String {
        format!("{} x {}", self.reps, Distance::new(self.distance, self.unit))
    }
}

/// A structured workout as produced by workout authoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<IntervalSpec>,
}

/// Split for one interval of a workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSplit {
    pub label: String,
    pub zone: Zone,
    pub split: String,
    pub recovery: Option<String>,
}

impl Workout {
    /// One split per interval, in workout order
    pub fn splits(&self, vdot: f64) -> Vec<IntervalSplit> {
        self.items
            .iter()
            .map(|item| IntervalSplit {
                label: item.label(),
                zone: item.zone,
                split: item.split(vdot),
                recovery: item.recovery.clone(),
            })
            .collect()
    }

    /// Total interval volume in miles (`distance × reps`, summed)
    pub fn total_volume_miles(&self) -> f64 {
        self.items.iter().map(IntervalSpec::volume_miles).sum()
    }
}

/// Column of the split matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixColumn {
    pub label: String,
    pub meters: f64,
}

impl MatrixColumn {
    pub fn new(meters: f64) -> Self {
        Self {
            label: column_label(meters),
            meters,
        }
    }
}

fn column_label(meters: f64) -> String {
    if (meters - METERS_PER_MILE).abs() < 1.0 {
        "Mile".to_string()
    } else if meters >= 1000.0 && meters % 1000.0 == 0.0 {
        format!("{}k", meters / 1000.0)
    } else {
        format!("{}m", meters)
    }
}

/// Row of the split matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub zone: Zone,
    pub splits: Vec<String>,
}

/// Zone × distance table of splits for one athlete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitMatrix {
    pub vdot: f64,
    pub columns: Vec<MatrixColumn>,
    pub rows: Vec<MatrixRow>,
}

/// Build the split matrix for `vdot` over `zones` × `distances_meters`
pub fn split_matrix(vdot: f64, zones: &[Zone], distances_meters: &[f64]) -> SplitMatrix {
    let columns: Vec<MatrixColumn> =
        distances_meters.iter().map(|&m| MatrixColumn::new(m)).collect();

    let rows = zones
        .iter()
        .map(|&zone| MatrixRow {
            zone,
            splits: columns
                .iter()
                .map(|column| calculate_split(column.meters, Unit::Meters, zone, vdot))
                .collect(),
        })
        .collect();

    SplitMatrix { vdot, columns, rows }
}

/// Split matrix with the default zones and distances
pub fn default_split_matrix(vdot: f64) -> SplitMatrix {
    split_matrix(vdot, &DEFAULT_MATRIX_ZONES, &DEFAULT_MATRIX_DISTANCES)
}
