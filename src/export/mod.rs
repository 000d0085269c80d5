// Export module for measurement logs

pub mod csv;
pub mod json;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::session::Measurement;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Parse the config-file spelling of a format.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        source: ::csv::Error,
    },
    #[error("failed to serialize measurements: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the measurement log to `path` in the given format. Both formats
/// share one schema: `row_identifier, column, value, measure, kind`,
/// with empty column and value for overall judgments.
pub fn write_measurements(
    path: &Path,
    format: ExportFormat,
    measurements: &[Measurement],
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => csv::write(path, measurements),
        ExportFormat::Json => json::write(path, measurements),
    }
}

/// The default export location for a dataset: next to the dataset file,
/// `<stem>_measurements.<ext>`.
pub fn export_path(dataset_path: &Path, format: ExportFormat) -> PathBuf {
    let stem = dataset_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("measurements");
    dataset_path.with_file_name(format!("{}_measurements.{}", stem, format.extension()))
}
