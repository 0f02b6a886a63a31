//! CSV re-export of the filtered table.

use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{ReportError, Result};

pub const EXPORT_FILE_NAME: &str = "filtered_hr_data.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// UTF-8 CSV with a byte-order mark, or `None` for an empty table.
pub fn export_csv(frame: &DataFrame) -> Result<Option<Vec<u8>>> {
    if frame.height() == 0 {
        return Ok(None);
    }
    let mut buf = UTF8_BOM.to_vec();
    let mut frame = frame.clone();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(Some(buf))
}

/// Writes [`export_csv`] output to `path`; returns false when nothing was written.
pub fn write_csv(frame: &DataFrame, path: &Path) -> Result<bool> {
    let Some(bytes) = export_csv(frame)? else {
        return Ok(false);
    };
    std::fs::write(path, &bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = frame.height(), "filtered table exported");
    Ok(true)
}
