//! Unified error hierarchy for vdotrs
//!
//! The engine's lenient entry points never fail; these types back the strict
//! variants (`try_*`, `FromStr`) and the export layer.

use crate::export::ExportError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for all vdotrs operations
#[derive(Debug, Error)]
pub enum VdotError {
    /// Pace engine input errors
    #[error("Pace error: {0}")]
    Pace(#[from] PaceError),

    /// Export errors
    #[error("Export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

/// Errors raised by the strict pace engine entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaceError {
    /// Time text was not `MM:SS` or `H:MM:SS`
    #[error("Invalid time '{input}': expected MM:SS or H:MM:SS")]
    InvalidTime { input: String },

    /// Zone name is not in the zone table
    #[error("Unknown zone: {name}")]
    UnknownZone { name: String },

    /// Unit is not one of m, km, mi
    #[error("Unknown unit: {name} (expected m, km or mi)")]
    UnknownUnit { name: String },

    /// VDOT outside the plausible range, or outside what the velocity
    /// bracket can represent for the requested distance
    #[error("VDOT {vdot} outside projectable range {min:.1}-{max:.1}")]
    VdotOutOfRange { vdot: f64, min: f64, max: f64 },

    /// Distance must be positive and finite
    #[error("Invalid distance: {meters} m")]
    InvalidDistance { meters: f64 },
}

/// Result type alias for vdotrs operations
pub type Result<T> = std::result::Result<T, VdotError>;

impl VdotError {
    /// Attach the target path to an export failure
    pub fn export(path: &Path, err: ExportError) -> Self {
        VdotError::Export {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VdotError::Pace(_) => ErrorSeverity::Warning,
            VdotError::Export { .. } => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VdotError::Pace(PaceError::InvalidTime { input }) => {
                format!("Could not read '{}' as a race time. Use MM:SS or H:MM:SS.", input)
            }
            VdotError::Pace(PaceError::VdotOutOfRange { vdot, min, max }) => format!(
                "A VDOT of {:.1} can't be projected here; use a value between {:.1} and {:.1}.",
                vdot, min, max
            ),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}
