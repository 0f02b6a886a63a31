//! Trying decoding strategies on raw bytes until one yields a table.
//!
//! CSV attempts run first, crossing every [`SourceEncoding`] with every
//! [`DelimiterHint`]; the first combination that parses without a structural
//! error wins. When all of them fail the bytes are read as a workbook. Each
//! attempt borrows the original buffer immutably.

use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::csv::{DelimiterHint, SourceEncoding, delimiter_label, parse_delimited};
use crate::error::{AttemptError, IngestError, Result};
use crate::frame::build_frame;
use crate::polars_utils::column_headers;
use crate::spreadsheet::read_first_worksheet;

/// Local file read when nothing was uploaded.
pub const DEFAULT_LOCAL_FILE: &str = "hr_analysis_results.csv";

/// Where the bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Uploaded(String),
    Local(PathBuf),
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded(name) => write!(f, "uploaded: {name}"),
            Self::Local(path) => write!(f, "local: {}", path.display()),
        }
    }
}

/// Strategy that produced the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv {
        encoding: SourceEncoding,
        hint: DelimiterHint,
        /// Delimiter actually used (the sniffed one for [`DelimiterHint::Auto`]).
        delimiter: u8,
    },
    Spreadsheet,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv {
                encoding,
                hint: DelimiterHint::Auto,
                delimiter,
            } => write!(
                f,
                "CSV loaded (encoding={}, sep=auto({}))",
                encoding.label(),
                delimiter_label(*delimiter)
            ),
            Self::Csv {
                encoding,
                delimiter,
                ..
            } => write!(
                f,
                "CSV loaded (encoding={}, sep={})",
                encoding.label(),
                delimiter_label(*delimiter)
            ),
            Self::Spreadsheet => f.write_str("Spreadsheet loaded (first worksheet)"),
        }
    }
}

/// Observability record of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    pub source: LoadSource,
    pub format: TableFormat,
}

impl LoadDiagnostic {
    /// Human-readable message naming the winning strategy.
    pub fn message(&self) -> String {
        self.format.to_string()
    }
}

/// A decoded table plus how it was decoded.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub frame: DataFrame,
    pub diagnostic: LoadDiagnostic,
}

impl LoadedTable {
    /// Trimmed header names in column order.
    pub fn headers(&self) -> Vec<String> {
        column_headers(&self.frame)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }
}

/// Decodes uploaded bytes into a table.
///
/// `filename_hint` only labels the source; the attempt order is the same for
/// every file. On failure the error carries the last attempt's diagnostic.
pub fn load_table(bytes: &[u8], filename_hint: &str) -> Result<LoadedTable> {
    load_from_source(bytes, LoadSource::Uploaded(filename_hint.to_string()))
}

/// Reads and decodes a local file.
pub fn load_path(path: &Path) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    load_from_source(&bytes, LoadSource::Local(path.to_path_buf()))
}

fn load_from_source(bytes: &[u8], source: LoadSource) -> Result<LoadedTable> {
    let span = info_span!("load", source = %source, bytes = bytes.len());
    let _guard = span.enter();

    let mut last_error = String::new();
    for encoding in SourceEncoding::ATTEMPT_ORDER {
        let Some(text) = encoding.decode(bytes) else {
            let error = AttemptError::Decode {
                encoding: encoding.label(),
            };
            debug!(encoding = encoding.label(), "decode failed");
            last_error = format!("[csv enc={}] {error}", encoding.label());
            continue;
        };
        for hint in DelimiterHint::ATTEMPT_ORDER {
            let delimiter = hint.resolve(&text);
            let attempt = parse_delimited(&text, delimiter)
                .and_then(|raw| build_frame(raw).map_err(AttemptError::from));
            match attempt {
                Ok(frame) => {
                    let format = TableFormat::Csv {
                        encoding,
                        hint,
                        delimiter,
                    };
                    info!(
                        encoding = encoding.label(),
                        delimiter = %delimiter_label(delimiter),
                        rows = frame.height(),
                        columns = frame.width(),
                        "table loaded"
                    );
                    return Ok(LoadedTable {
                        frame,
                        diagnostic: LoadDiagnostic { source, format },
                    });
                }
                Err(error) => {
                    debug!(
                        encoding = encoding.label(),
                        delimiter = %hint.label(),
                        %error,
                        "csv attempt failed"
                    );
                    last_error = format!(
                        "[csv enc={} sep={}] {error}",
                        encoding.label(),
                        hint.label()
                    );
                }
            }
        }
    }

    let attempt =
        read_first_worksheet(bytes).and_then(|raw| build_frame(raw).map_err(AttemptError::from));
    match attempt {
        Ok(frame) => {
            info!(
                rows = frame.height(),
                columns = frame.width(),
                "workbook loaded"
            );
            Ok(LoadedTable {
                frame,
                diagnostic: LoadDiagnostic {
                    source,
                    format: TableFormat::Spreadsheet,
                },
            })
        }
        Err(error) => {
            last_error = format!("[spreadsheet] {error}");
            warn!(last_error = %last_error, "no decoding strategy succeeded");
            Err(IngestError::Unreadable {
                source_name: source.to_string(),
                last_error,
            })
        }
    }
}
