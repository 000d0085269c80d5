//! Session spec: which columns to present, which measure vocabularies to
//! offer, and which rows to visit (explicit pagination or a seeded sample).
//!
//! Loaded from YAML, in this search order:
//!   1) explicit path (if provided)
//!   2) ./session.yaml in the working directory
//!   3) ~/.config/rowgrade/session.yaml
//! falling back to built-in defaults when nothing is found.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::dataset::RecordTable;
use crate::session::{RowId, Session, SessionError};

/// Label vocabularies. `overall` applies to the whole record, `each`
/// independently to every presented column; an absent slot means the
/// corresponding affordance is not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub each: Option<Vec<String>>,
}

impl MeasureSet {
    pub fn is_empty(&self) -> bool {
        self.overall.is_none() && self.each.is_none()
    }
}

/// How many rows to sample, and optionally a seed for reproducibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSpec {
    pub n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// One labeling session's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpec {
    /// Columns to present; all table columns when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub measures: MeasureSet,
    /// Explicit visit order (row identifiers, repeats allowed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Vec<RowId>>,
    /// Random subset to visit; ignored when `pagination` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleSpec>,
}

impl Default for SessionSpec {
    fn default() -> Self {
        Self {
            columns: None,
            measures: MeasureSet {
                overall: Some(vec!["Good".to_string(), "Bad".to_string()]),
                each: None,
            },
            pagination: None,
            sample: None,
        }
    }
}

impl SessionSpec {
    /// The columns to present for `table`.
    pub fn resolve_columns(&self, table: &RecordTable) -> Vec<String> {
        self.columns
            .clone()
            .unwrap_or_else(|| table.columns().to_vec())
    }

    /// Materialize the visit order for `table`. Explicit pagination wins
    /// over sampling; `None` means every row in natural order.
    pub fn resolve_pagination(
        &self,
        table: &RecordTable,
    ) -> Result<Option<Vec<RowId>>, SessionError> {
        if let Some(pagination) = &self.pagination {
            if self.sample.is_some() {
                warn!("Session spec has both pagination and sample; using pagination.");
            }
            return Ok(Some(pagination.clone()));
        }
        if let Some(sample) = &self.sample {
            return Ok(Some(Session::sample_rows(table, sample.n, sample.seed)?));
        }
        Ok(None)
    }
}

/// Load the session spec from YAML, searching the standard locations.
pub fn load_session_spec(path: Option<&str>) -> SessionSpec {
    let mut search_paths: Vec<String> = Vec::new();
    if let Some(p) = path {
        search_paths.push(p.to_string());
    }
    search_paths.push("./session.yaml".to_string());
    search_paths.push("~/.config/rowgrade/session.yaml".to_string());

    for candidate in search_paths {
        let expanded = shellexpand::tilde(&candidate);
        let path_obj = Path::new(expanded.as_ref());
        if !path_obj.exists() {
            continue;
        }

        match try_load_spec_file(path_obj) {
            Ok(spec) => return spec,
            Err(e) => warn!(
                "Failed to parse session spec '{}': {}",
                path_obj.display(),
                e
            ),
        }
    }

    info!("No session spec found; using defaults.");
    SessionSpec::default()
}

/// Attempt to load one spec file; returns an error string on failure so
/// the caller can continue searching other candidates.
fn try_load_spec_file(path: &Path) -> Result<SessionSpec, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("read error {}: {}", path.display(), e))?;
    parse_spec_content(&content)
}

fn parse_spec_content(content: &str) -> Result<SessionSpec, String> {
    serde_yaml::from_str::<SessionSpec>(content).map_err(|e| format!("yaml parse error: {}", e))
}
