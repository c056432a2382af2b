use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod csv;
pub mod json;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExportError::UnsupportedFormat(path.display().to_string()))?;
        extension.parse()
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
