//! Delimited-text decoding: encodings, delimiters and the field parser.

mod delimiter;
mod encoding;
mod reader;

pub use delimiter::{DelimiterHint, delimiter_label, sniff_delimiter};
pub use encoding::SourceEncoding;
pub(crate) use reader::parse_delimited;
