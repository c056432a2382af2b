use crate::error::PaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meters in one statute mile, as used throughout the pace tables
pub const METERS_PER_MILE: f64 = 1609.34;

/// Meters in one kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Miles per kilometer, used for workout volume totals
pub const MILES_PER_KM: f64 = 0.621371;

/// Miles per meter, paired with [`miles_to_meters`]
pub const MILES_PER_METER: f64 = 0.000621371;

/// Distance unit accepted by the split calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Kilometers => "km",
            Unit::Miles => "mi",
        }
    }

    /// Meters represented by one of this unit
    pub fn meters(&self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Kilometers => METERS_PER_KM,
            Unit::Miles => METERS_PER_MILE,
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Meters
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Unit::Meters),
            "km" | "kilometer" | "kilometers" => Ok(Unit::Kilometers),
            "mi" | "mile" | "miles" => Ok(Unit::Miles),
            _ => Err(PaceError::UnknownUnit { name: s.to_string() }),
        }
    }
}

/// A magnitude paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: Unit,
}

impl Distance {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Normalize to meters (`km × 1000`, `mi × 1609.34`)
    pub fn to_meters(&self) -> f64 {
        match self.unit {
            Unit::Meters => self.value,
            unit => self.value * unit.meters(),
        }
    }

    /// Convert to miles for volume reporting
    pub fn to_miles(&self) -> f64 {
        match self.unit {
            Unit::Meters => self.value / METERS_PER_MILE,
            Unit::Kilometers => self.value * MILES_PER_KM,
            Unit::Miles => self.value,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles / MILES_PER_METER
}
