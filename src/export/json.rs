// JSON measurement export

use std::fs;
use std::path::Path;

use super::ExportError;
use crate::session::Measurement;

pub fn write(path: &Path, measurements: &[Measurement]) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(measurements)?;
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
