//! Record source loading and access.
//!
//! A `RecordTable` is the ordered, read-only table a session pages
//! through: named columns, string cells. Tables load from CSV files
//! with a header row, or from a JSON manifest of the shape
//! `{ "columns": [...], "rows": [[...], ...] }`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::session::RowId;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CSV {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unsupported dataset format '{extension}' (expected csv or json)")]
    UnknownFormat { extension: String },
}

/// An ordered, indexable table of records. Rows are addressed by their
/// position; cells are display strings.
#[derive(Debug, Clone)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// On-disk shape of a JSON dataset.
#[derive(Debug, Deserialize)]
struct TableFile {
    columns: Vec<String>,
    rows: Vec<Vec<serde_json::Value>>,
}

impl RecordTable {
    /// Build a table from pre-parsed columns and rows. Every row must
    /// have exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    row: index,
                    found: row.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Load a table from `path`, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Self::from_csv_path(path),
            "json" => Self::from_json_path(path),
            _ => Err(DatasetError::UnknownFormat { extension }),
        }
    }

    fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|source| DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::new(columns, rows)
    }

    fn from_json_path(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: TableFile =
            serde_json::from_str(&content).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let rows = parsed
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(display_value).collect())
            .collect();
        Self::new(parsed.columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// The cell at `(row, column)`, or `None` if either is unknown.
    pub fn value(&self, row: RowId, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }
}

/// Render a JSON cell for display: strings unquoted, null empty,
/// everything else in its JSON form.
fn display_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
