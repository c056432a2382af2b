//! VDOT-based training groups
//!
//! Splits a roster into similar-fitness groups for a session so each group
//! can run the same interval at a shared target split.

use crate::splits::IntervalSpec;
use serde::{Deserialize, Serialize};

/// Target number of athletes per group
pub const DEFAULT_GROUP_SIZE: usize = 5;

/// Athlete as seen by the grouping step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vdot: Option<f64>,
}

impl Athlete {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vdot: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vdot,
        }
    }

    fn graded_vdot(&self) -> Option<f64> {
        self.vdot.filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// A named group of athletes, fastest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingGroup {
    pub name: String,
    pub athletes: Vec<Athlete>,
}

/// One athlete's target split for an interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteSplit {
    pub athlete: String,
    pub split: String,
}

impl TrainingGroup {
    /// Per-athlete splits for `interval`
    pub fn splits_for(&self, interval: &IntervalSpec) -> Vec<AthleteSplit> {
        self.athletes
            .iter()
            .map(|athlete| AthleteSplit {
                athlete: athlete.name.clone(),
                split: interval.split(athlete.vdot.unwrap_or(0.0)),
            })
            .collect()
    }
}

/// Group athletes by fitness.
///
/// Athletes without a positive VDOT are left out. The rest are sorted by VDOT
/// descending (ties keep roster order) and chunked into groups of
/// `group_size`. Groups take names from `names` in order, then `Group N`.
pub fn group_athletes(
    athletes: &[Athlete],
    group_size: usize,
    names: &[String],
) -> Vec<TrainingGroup> {
    let group_size = group_size.max(1);

    let mut graded: Vec<&Athlete> = athletes.iter().filter(|a| a.graded_vdot().is_some()).collect();
    graded.sort_by(|a, b| b.vdot.unwrap_or(0.0).total_cmp(&a.vdot.unwrap_or(0.0)));

    tracing::debug!(
        total = athletes.len(),
        graded = graded.len(),
        group_size,
        "Grouping athletes by VDOT"
    );

    graded
        .chunks(group_size)
        .enumerate()
        .map(|(index, chunk)| TrainingGroup {
            name: names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Group {}", index + 1)),
            athletes: chunk.iter().map(|&a| a.clone()).collect(),
        })
        .collect()
}
