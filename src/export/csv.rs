// CSV measurement export

use csv::Writer;
use std::path::Path;

use super::ExportError;
use crate::session::Measurement;

pub fn write(path: &Path, measurements: &[Measurement]) -> Result<(), ExportError> {
    let mut writer = Writer::from_path(path).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    for measurement in measurements {
        writer
            .serialize(measurement)
            .map_err(|source| ExportError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
