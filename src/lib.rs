// Library interface for the vdotrs pace engine
// The engine is pure and stateless; config, export and logging serve the CLI

pub mod config;
pub mod error;
pub mod export;
pub mod grouping;
pub mod logging;
pub mod paces;
pub mod splits;
pub mod time_codec;
pub mod units;
pub mod vdot;
pub mod zones;

// Re-export commonly used types for convenience
pub use error::{PaceError, Result, VdotError};
pub use grouping::{group_athletes, Athlete, TrainingGroup};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use paces::{derive_paces, derive_paces_from_vdot, pace_per_mile, PaceReport};
pub use splits::{
    calculate_split, calculate_split_by_name, split_matrix, split_seconds, IntervalSpec,
    SplitMatrix, Workout,
};
pub use time_codec::{format_duration, parse_duration, try_parse_duration};
pub use units::{Distance, Unit};
pub use vdot::{estimate_vdot, project_time, try_project_time};
pub use zones::{Zone, ZoneSpec};
