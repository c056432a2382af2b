//! Training and race zone table
//!
//! Training zones are bands of 5K velocity (the model's vVO2max proxy); race
//! zones are target distances whose pace comes straight from VDOT projection.
//! The table is fixed by coaching convention and never athlete-specific.

use crate::error::PaceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Named training intensity or race-equivalent effort, ordered slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Recovery,
    Foundation,
    Steady,
    Tempo,
    Threshold,
    Cv,
    Race5k,
    Race3200,
    Race1600,
    Race800,
    Race400,
}

/// What a zone is defined by
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneSpec {
    /// Band of 5K velocity; `slow_factor < fast_factor`, both in (0, 1)
    Training { slow_factor: f64, fast_factor: f64 },
    /// Race-equivalent effort at the given distance
    Race { distance_meters: f64 },
}

impl ZoneSpec {
    /// Midpoint of a training band, `None` for race zones
    pub fn average_factor(&self) -> Option<f64> {
        match *self {
            ZoneSpec::Training {
                slow_factor,
                fast_factor,
            } => Some((slow_factor + fast_factor) / 2.0),
            ZoneSpec::Race { .. } => None,
        }
    }
}

impl Zone {
    /// Every zone, slowest to fastest
    pub const ALL: [Zone; 11] = [
        Zone::Recovery,
        Zone::Foundation,
        Zone::Steady,
        Zone::Tempo,
        Zone::Threshold,
        Zone::Cv,
        Zone::Race5k,
        Zone::Race3200,
        Zone::Race1600,
        Zone::Race800,
        Zone::Race400,
    ];

    pub const TRAINING: [Zone; 6] = [
        Zone::Recovery,
        Zone::Foundation,
        Zone::Steady,
        Zone::Tempo,
        Zone::Threshold,
        Zone::Cv,
    ];

    pub const RACE: [Zone; 5] = [
        Zone::Race5k,
        Zone::Race3200,
        Zone::Race1600,
        Zone::Race800,
        Zone::Race400,
    ];

    /// Zone used when a caller supplies a name the table doesn't know
    pub const FALLBACK: Zone = Zone::Foundation;

    pub fn spec(self) -> ZoneSpec {
        use ZoneSpec::{Race, Training};

        match self {
            Zone::Recovery => Training {
                slow_factor: 0.63,
                fast_factor: 0.69,
            },
            Zone::Foundation => Training {
                slow_factor: 0.70,
                fast_factor: 0.80,
            },
            Zone::Steady => Training {
                slow_factor: 0.80,
                fast_factor: 0.85,
            },
            Zone::Tempo => Training {
                slow_factor: 0.86,
                fast_factor: 0.90,
            },
            Zone::Threshold => Training {
                slow_factor: 0.91,
                fast_factor: 0.94,
            },
            Zone::Cv => Training {
                slow_factor: 0.95,
                fast_factor: 0.97,
            },
            Zone::Race5k => Race {
                distance_meters: 5000.0,
            },
            Zone::Race3200 => Race {
                distance_meters: 3200.0,
            },
            Zone::Race1600 => Race {
                distance_meters: 1600.0,
            },
            Zone::Race800 => Race {
                distance_meters: 800.0,
            },
            Zone::Race400 => Race {
                distance_meters: 400.0,
            },
        }
    }

    /// Display name used by workout authoring and the dashboard
    pub fn name(self) -> &'static str {
        match self {
            Zone::Recovery => "Recovery",
            Zone::Foundation => "Foundation",
            Zone::Steady => "Steady",
            Zone::Tempo => "Tempo",
            Zone::Threshold => "Lactate Threshold",
            Zone::Cv => "CV",
            Zone::Race5k => "5K Race",
            Zone::Race3200 => "3200m Race",
            Zone::Race1600 => "1600m Race",
            Zone::Race800 => "800m Race",
            Zone::Race400 => "400m Race",
        }
    }

    /// Compact label for table headers
    pub fn short_name(self) -> &'static str {
        match self {
            Zone::Threshold => "LT",
            Zone::Race5k => "5K",
            Zone::Race3200 => "3200m",
            Zone::Race1600 => "1600m",
            Zone::Race800 => "800m",
            Zone::Race400 => "400m",
            other => other.name(),
        }
    }

    /// Look up a zone by name, falling back to [`Zone::FALLBACK`]
    pub fn from_name_or_fallback(name: &str) -> Zone {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                zone = name,
                fallback = Zone::FALLBACK.name(),
                "Unknown zone, using fallback"
            );
            Zone::FALLBACK
        })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let zone = match key.as_str() {
            "recovery" => Zone::Recovery,
            "foundation" => Zone::Foundation,
            "steady" => Zone::Steady,
            "tempo" => Zone::Tempo,
            "lactate threshold" | "threshold" | "lt" => Zone::Threshold,
            "cv" => Zone::Cv,
            "5k race" | "5k" => Zone::Race5k,
            "3200m race" | "3200m" | "3200" => Zone::Race3200,
            "1600m race" | "1600m" | "1600" => Zone::Race1600,
            "800m race" | "800m" | "800" => Zone::Race800,
            "400m race" | "400m" | "400" => Zone::Race400,
            _ => return Err(PaceError::UnknownZone { name: s.to_string() }),
        };
        Ok(zone)
    }
}

// Zones travel as their display names, the way workout JSON spells them.
impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
