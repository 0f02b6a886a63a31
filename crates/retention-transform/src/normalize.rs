//! Numeric coercion of mapped columns.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};
use retention_ingest::polars_utils::{any_to_f64, column_headers};
use retention_model::{ColumnMapping, FieldKey};
use tracing::{debug, info_span};

use crate::error::Result;

/// Parse a cell as a number.
///
/// Handles:
/// - Thousands separators: "85,000,000"
/// - Surrounding whitespace, including non-breaking spaces: " 42 "
/// - Scientific notation: "1.5e3"
/// - Infinities: "inf", "-infinity"
///
/// Returns `None` for empty, unparseable and NaN values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value.chars().filter(|ch| *ch != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Numeric value of one cell; text cells go through [`parse_numeric`].
fn cell_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::String(s) => parse_numeric(s),
        AnyValue::StringOwned(s) => parse_numeric(&s),
        other => any_to_f64(other),
    }
}

fn numeric_series(column: &Column) -> Series {
    let values: Vec<Option<f64>> = (0..column.len())
        .map(|idx| column.get(idx).ok().and_then(cell_to_f64))
        .collect();
    Series::new(column.name().clone(), values)
}

/// Coerces every mapped numeric column of `df` to Float64.
///
/// Unparseable cells become null. Unmapped keys and mapped headers missing
/// from the table are skipped; no column is created. Running it again on its
/// own output changes nothing.
pub fn normalize_table(df: &DataFrame, mapping: &ColumnMapping) -> Result<DataFrame> {
    let span = info_span!("normalize", rows = df.height());
    let _guard = span.enter();

    let headers = column_headers(df);
    let targets: BTreeSet<&str> = FieldKey::NUMERIC
        .into_iter()
        .filter_map(|key| mapping.resolve(key, &headers))
        .collect();

    let mut out = df.clone();
    for name in targets {
        let column = df.column(name)?;
        let series = numeric_series(column);
        debug!(
            column = name,
            missing = series.null_count(),
            "numeric column normalized"
        );
        out.with_column(series)?;
    }
    Ok(out)
}
