//! Building a polars frame from decoded rows.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::polars_utils::format_numeric;

/// Cell tokens read as missing values.
const NA_TOKENS: [&str; 16] = [
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null", "-1.#IND",
];

/// One decoded cell before column typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    /// Trims a text cell and folds missing-value tokens into [`RawCell::Empty`].
    pub(crate) fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if NA_TOKENS.contains(&trimmed) {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.parse::<f64>().ok(),
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Number(value) => Some(format_numeric(value)),
            Self::Text(text) => Some(text),
        }
    }
}

/// Header row plus data rows, as decoded from one attempt.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// Trims surrounding whitespace and byte-order marks from a header cell.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Names empty headers `Unnamed: <idx>` and suffixes repeats with `.1`, `.2`, ...
pub(crate) fn unique_headers(headers: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut unique = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.clone()
        };
        let mut candidate = base.clone();
        while let Some(count) = seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{base}.{count}");
        }
        seen.insert(candidate.clone(), 0);
        unique.push(candidate);
    }
    unique
}

/// Builds the raw frame.
///
/// A column whose non-empty cells all parse as plain numbers becomes Float64;
/// any other column is text, with numeric cells rendered without trailing zeros.
pub(crate) fn build_frame(raw: RawRows) -> polars::prelude::PolarsResult<DataFrame> {
    let RawRows { headers, rows } = raw;
    let headers = unique_headers(&headers);
    let mut by_column: Vec<Vec<RawCell>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for row in rows {
        let mut cells = row.into_iter();
        for column in &mut by_column {
            column.push(cells.next().unwrap_or(RawCell::Empty));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(by_column)
        .map(|(name, cells)| build_column(name, cells))
        .collect();
    DataFrame::new(columns)
}

fn build_column(name: &str, cells: Vec<RawCell>) -> Column {
    let has_values = cells.iter().any(|cell| *cell != RawCell::Empty);
    let all_numeric = cells
        .iter()
        .all(|cell| *cell == RawCell::Empty || cell.as_number().is_some());
    if has_values && all_numeric {
        let values: Vec<Option<f64>> = cells.iter().map(RawCell::as_number).collect();
        Series::new(name.into(), values).into_column()
    } else {
        let values: Vec<Option<String>> = cells.into_iter().map(RawCell::into_text).collect();
        Series::new(name.into(), values).into_column()
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::DataType;

    use super::*;

    fn text(value: &str) -> RawCell {
        RawCell::from_text(value)
    }

    #[test]
    fn test_unique_headers() {
        let headers = vec![
            "a".to_string(),
            String::new(),
            "a".to_string(),
            "a".to_string(),
        ];
        assert_eq!(
            unique_headers(&headers),
            vec!["a", "Unnamed: 1", "a.1", "a.2"]
        );
    }

    #[test]
    fn test_normalize_header_strips_bom() {
        assert_eq!(normalize_header("\u{feff} 성명 "), "성명");
    }

    #[test]
    fn test_na_tokens_are_empty() {
        assert_eq!(text("  "), RawCell::Empty);
        assert_eq!(text("NaN"), RawCell::Empty);
        assert_eq!(text(" x "), RawCell::Text("x".to_string()));
    }

    #[test]
    fn test_column_typing() {
        let raw = RawRows {
            headers: vec!["risk".to_string(), "salary".to_string(), "name".to_string()],
            rows: vec![
                vec![text("75"), text("1,000"), text("Kim")],
                vec![text(""), RawCell::Number(2000.0), RawCell::Number(3.0)],
            ],
        };
        let df = build_frame(raw).unwrap();
        assert_eq!(df.column("risk").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("salary").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
        let names = df.column("name").unwrap().str().unwrap();
        assert_eq!(names.get(1), Some("3"));
        assert_eq!(df.column("risk").unwrap().f64().unwrap().get(1), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let raw = RawRows {
            headers: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec![text("x")]],
        };
        let df = build_frame(raw).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("b").unwrap().null_count(), 1);
    }
}
