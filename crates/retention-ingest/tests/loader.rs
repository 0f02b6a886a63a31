use std::fs;
use std::path::PathBuf;

use encoding_rs::{EUC_KR, WINDOWS_1252};
use polars::prelude::DataFrame;
use retention_ingest::{
    DelimiterHint, IngestError, LoadSource, SourceEncoding, TableFormat, load_path, load_table,
    polars_utils::{any_to_f64, any_to_string},
};

const HR_TEXT: &str = "성명;본부;퇴직위험도\n김민수;영업본부;75\n이영희;개발본부;40\n";
const LATIN1_TEXT: &str = "name;city\nJosé;Café\n";

fn cell_strings(frame: &DataFrame, name: &str) -> Vec<String> {
    let column = frame.column(name).expect("column present");
    (0..column.len())
        .map(|idx| column.get(idx).map(any_to_string).unwrap_or_default())
        .collect()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Bytes of `text` as a file saved under `encoding` would carry them.
fn encode_as(encoding: SourceEncoding, text: &str) -> Vec<u8> {
    match encoding {
        SourceEncoding::Utf8 => text.as_bytes().to_vec(),
        SourceEncoding::Utf8Sig => {
            let mut bytes = b"\xEF\xBB\xBF".to_vec();
            bytes.extend_from_slice(text.as_bytes());
            bytes
        }
        SourceEncoding::Cp949 | SourceEncoding::EucKr => {
            let (bytes, _, had_errors) = EUC_KR.encode(text);
            assert!(!had_errors, "{text:?} is not representable in euc-kr");
            bytes.into_owned()
        }
        SourceEncoding::Latin1 => {
            let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
            assert!(!had_errors, "{text:?} is not representable in latin1");
            bytes.into_owned()
        }
    }
}

#[test]
fn reads_cp949_semicolon_table() {
    let (bytes, _, had_errors) = EUC_KR.encode(HR_TEXT);
    assert!(!had_errors);
    let table = load_table(&bytes, "hr.csv").expect("load cp949");

    assert_eq!(table.headers(), vec!["성명", "본부", "퇴직위험도"]);
    assert_eq!(table.height(), 2);
    assert_eq!(
        table.diagnostic.format,
        TableFormat::Csv {
            encoding: SourceEncoding::Cp949,
            hint: DelimiterHint::Auto,
            delimiter: b';',
        }
    );
    let message = table.diagnostic.message();
    assert!(message.contains("cp949"), "{message}");
    assert!(message.contains(';'), "{message}");
    assert_eq!(cell_strings(&table.frame, "본부"), vec!["영업본부", "개발본부"]);
}

#[test]
fn numeric_columns_are_typed() {
    let table = load_table(HR_TEXT.as_bytes(), "hr.csv").expect("load utf-8");
    let risk = table.frame.column("퇴직위험도").expect("risk column");
    let values: Vec<Option<f64>> = (0..risk.len())
        .map(|idx| risk.get(idx).ok().and_then(any_to_f64))
        .collect();
    assert_eq!(values, vec![Some(75.0), Some(40.0)]);
}

#[test]
fn same_table_under_every_delimiter() {
    for delimiter in [",", ";", "\t", "|"] {
        let text = HR_TEXT.replace(';', delimiter);
        let table = load_table(text.as_bytes(), "hr.csv").expect("load");
        assert_eq!(
            table.headers(),
            vec!["성명", "본부", "퇴직위험도"],
            "delimiter {delimiter:?}"
        );
        assert_eq!(table.height(), 2);
    }
}

#[test]
fn every_encoding_and_delimiter_round_trips() {
    let delimiters = DelimiterHint::ATTEMPT_ORDER
        .into_iter()
        .filter_map(|hint| match hint {
            DelimiterHint::Fixed(delimiter) => Some(char::from(delimiter)),
            DelimiterHint::Auto => None,
        });
    for delimiter in delimiters {
        for encoding in SourceEncoding::ATTEMPT_ORDER {
            let case = format!("{} sep={delimiter:?}", encoding.label());
            let (text, headers, key, values) = match encoding {
                SourceEncoding::Latin1 => (
                    LATIN1_TEXT.replace(';', &delimiter.to_string()),
                    &["name", "city"][..],
                    "city",
                    &["Café"][..],
                ),
                _ => (
                    HR_TEXT.replace(';', &delimiter.to_string()),
                    &["성명", "본부", "퇴직위험도"][..],
                    "본부",
                    &["영업본부", "개발본부"][..],
                ),
            };
            let bytes = encode_as(encoding, &text);
            let table = load_table(&bytes, "matrix.csv").unwrap_or_else(|e| panic!("{case}: {e}"));

            assert_eq!(table.headers(), headers, "{case}");
            assert_eq!(cell_strings(&table.frame, key), values, "{case}");
            let TableFormat::Csv {
                encoding: used,
                delimiter: used_delimiter,
                ..
            } = table.diagnostic.format
            else {
                panic!("{case}: expected csv");
            };
            assert_eq!(char::from(used_delimiter), delimiter, "{case}");
            // Plain utf-8 also strips a BOM and cp949 is a superset of euc-kr.
            let expected = match encoding {
                SourceEncoding::Utf8 | SourceEncoding::Utf8Sig => SourceEncoding::Utf8,
                SourceEncoding::Cp949 | SourceEncoding::EucKr => SourceEncoding::Cp949,
                SourceEncoding::Latin1 => SourceEncoding::Latin1,
            };
            assert_eq!(used, expected, "{case}");
        }
    }
}

#[test]
fn reads_first_worksheet_of_workbook() {
    let path = fixture("hr_sample.xlsx");
    let table = load_path(&path).expect("load workbook");

    assert_eq!(table.diagnostic.format, TableFormat::Spreadsheet);
    assert_eq!(table.diagnostic.source, LoadSource::Local(path));
    assert_eq!(
        table.headers(),
        vec!["성명", "본부", "퇴직위험도", "연봉(원)"]
    );
    assert_eq!(table.height(), 2);
    assert_eq!(cell_strings(&table.frame, "성명"), vec!["김민수", "이영희"]);
    assert_eq!(cell_strings(&table.frame, "본부"), vec!["영업본부", "개발본부"]);

    let risk = table.frame.column("퇴직위험도").expect("risk column");
    let risk: Vec<Option<f64>> = (0..risk.len())
        .map(|idx| risk.get(idx).ok().and_then(any_to_f64))
        .collect();
    assert_eq!(risk, vec![Some(75.0), Some(45.5)]);
    let salary = table.frame.column("연봉(원)").expect("salary column");
    assert_eq!(salary.null_count(), 1);
}

#[test]
fn uploaded_workbook_bytes_load_as_spreadsheet() {
    let bytes = fs::read(fixture("hr_sample.xlsx")).expect("read fixture");
    let table = load_table(&bytes, "hr_sample.xlsx").expect("load workbook");
    assert_eq!(table.diagnostic.format, TableFormat::Spreadsheet);
    let message = table.diagnostic.message();
    assert!(message.contains("Spreadsheet"), "{message}");
}

#[test]
fn utf8_bom_is_not_part_of_first_header() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice("name,org,risk\nKim,Sales,80\n".as_bytes());
    let table = load_table(&bytes, "bom.csv").expect("load");
    assert_eq!(table.headers()[0], "name");
}

#[test]
fn falls_back_to_latin1() {
    let (bytes, _, _) = WINDOWS_1252.encode("name,city\nJosé,Café\n");
    let table = load_table(&bytes, "latin.csv").expect("load latin1");
    match table.diagnostic.format {
        TableFormat::Csv { encoding, .. } => assert_eq!(encoding, SourceEncoding::Latin1),
        TableFormat::Spreadsheet => panic!("expected csv"),
    }
    assert_eq!(cell_strings(&table.frame, "city"), vec!["Café"]);
}

#[test]
fn missing_value_tokens_become_null() {
    let text = "name,org,risk\nKim,NA,\nLee,Dev,n/a\n";
    let table = load_table(text.as_bytes(), "na.csv").expect("load");
    let org = table.frame.column("org").expect("org");
    assert_eq!(org.null_count(), 1);
    let risk = table.frame.column("risk").expect("risk");
    assert_eq!(risk.null_count(), 2);
}

#[test]
fn unreadable_input_reports_last_attempt() {
    let err = load_table(b"", "empty.csv").expect_err("empty input");
    let IngestError::Unreadable { last_error, .. } = err else {
        panic!("unexpected error variant");
    };
    assert!(last_error.starts_with("[spreadsheet]"), "{last_error}");
}

#[test]
fn loads_local_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("hr_analysis_results.csv");
    fs::write(&path, HR_TEXT).expect("write file");

    let table = load_path(&path).expect("load path");
    assert_eq!(table.diagnostic.source, LoadSource::Local(path.clone()));
    assert_eq!(table.height(), 2);
}

#[test]
fn missing_local_path_is_file_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_path(&dir.path().join("absent.csv")).expect_err("missing");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
