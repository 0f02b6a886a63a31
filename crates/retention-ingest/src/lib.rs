//! Table ingestion for the retention dashboard.
//!
//! Uploaded bytes of unknown encoding, delimiter and format go through each
//! strategy in turn until one yields a table:
//!
//! 1. every encoding in [`SourceEncoding::ATTEMPT_ORDER`] crossed with every
//!    delimiter hint in [`DelimiterHint::ATTEMPT_ORDER`];
//! 2. the first worksheet of a spreadsheet workbook.
//!
//! The winning strategy is recorded in a [`LoadDiagnostic`].

mod csv;
pub mod error;
mod frame;
mod loader;
pub mod polars_utils;
mod spreadsheet;

pub use crate::csv::{DelimiterHint, SourceEncoding, delimiter_label, sniff_delimiter};
pub use error::{IngestError, Result};
pub use loader::{
    DEFAULT_LOCAL_FILE, LoadDiagnostic, LoadSource, LoadedTable, TableFormat, load_path,
    load_table,
};
