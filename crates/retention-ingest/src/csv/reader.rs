//! Parsing decoded text with a fixed delimiter.

use crate::error::AttemptError;
use crate::frame::{RawCell, RawRows, normalize_header};

/// Splits `text` into a header row and data rows.
///
/// Blank rows are skipped and short rows are padded later; a row with more
/// fields than the header is a structural error.
pub(crate) fn parse_delimited(text: &str, delimiter: u8) -> Result<RawRows, AttemptError> {
    if text.contains('\0') {
        return Err(AttemptError::BinaryContent);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records().filter(|record| {
        !matches!(record, Ok(values) if values.iter().all(|value| value.trim().is_empty()))
    });
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(normalize_header).collect(),
        None => return Err(AttemptError::NoColumns),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.len() > headers.len() {
            return Err(AttemptError::TooManyFields {
                expected: headers.len(),
                line: record.position().map_or(0, |position| position.line()),
                found: record.len(),
            });
        }
        rows.push(record.iter().map(RawCell::from_text).collect());
    }

    Ok(RawRows { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_semicolon() {
        let raw = parse_delimited("성명;본부\n김민수;영업본부\n\n이영희;개발본부\n", b';').unwrap();
        assert_eq!(raw.headers, vec!["성명", "본부"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1][1], RawCell::Text("개발본부".to_string()));
    }

    #[test]
    fn test_quoted_fields() {
        let raw = parse_delimited("name,note\n\"Kim, M\",\"said \"\"hi\"\"\"\n", b',').unwrap();
        assert_eq!(raw.rows[0][0], RawCell::Text("Kim, M".to_string()));
        assert_eq!(raw.rows[0][1], RawCell::Text("said \"hi\"".to_string()));
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse_delimited("a,b\n1,2\n1,2,3\n", b',').unwrap_err();
        assert!(matches!(
            err,
            AttemptError::TooManyFields {
                expected: 2,
                line: 3,
                found: 3
            }
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_delimited("\n\n", b','),
            Err(AttemptError::NoColumns)
        ));
    }

    #[test]
    fn test_binary_rejected() {
        assert!(matches!(
            parse_delimited("PK\u{3}\u{4}\0\0", b','),
            Err(AttemptError::BinaryContent)
        ));
    }
}
