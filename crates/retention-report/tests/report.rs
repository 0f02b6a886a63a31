use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use retention_model::UrgencyTier;
use retention_report::{
    ChecklistProgress, ChecklistSection, RetentionReport, estimate_roi, generate_package,
    report_file_name, write_csv,
};
use retention_transform::EmployeeRecord;

fn employee(risk: Option<f64>, salary: Option<f64>) -> EmployeeRecord {
    EmployeeRecord {
        name: Some("김민수".to_string()),
        org: Some("영업본부".to_string()),
        talent: Some("Critical".to_string()),
        risk,
        salary,
        ..EmployeeRecord::default()
    }
}

#[test]
fn missing_salary_keeps_tier_and_zeroes_money() {
    let record = employee(Some(80.0), None);
    let package = generate_package(record.risk, record.salary);
    let roi = estimate_roi(record.salary);
    assert_eq!(package.tier, UrgencyTier::Critical);
    assert_eq!(package.budget, 0);
    assert_eq!(roi.total, 0.0);
}

#[test]
fn report_json_snapshot() {
    let record = employee(Some(80.0), None);
    let package = generate_package(record.risk, record.salary);
    let roi = estimate_roi(record.salary);
    let mut progress = ChecklistProgress::new();
    progress
        .set(&package, ChecklistSection::Immediate, 0, true)
        .unwrap();

    let report = RetentionReport::new("김민수", &record, &package, &roi, &progress);
    let json = report.to_json().unwrap();
    insta::assert_snapshot!(json);
}

#[test]
fn report_carries_budget_and_loss() {
    let record = employee(Some(75.0), Some(85_000_000.0));
    let package = generate_package(record.risk, record.salary);
    let roi = estimate_roi(record.salary);
    let report = RetentionReport::new("김민수", &record, &package, &roi, &ChecklistProgress::new());
    assert_eq!(report.budget, 2125);
    assert_eq!(report.expected_loss_saved, 8500);
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["budget(만원)"], 2125);
    assert_eq!(value["expected_loss_saved(만원)"], 8500);
    assert!(value["completed_follow"].as_array().unwrap().is_empty());
}

#[test]
fn report_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let record = employee(Some(55.0), Some(50_000_000.0));
    let package = generate_package(record.risk, record.salary);
    let roi = estimate_roi(record.salary);
    let report = RetentionReport::new("김민수", &record, &package, &roi, &ChecklistProgress::new());

    let path = dir.path().join(report_file_name("김민수"));
    report.write(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"employee\": \"김민수\""));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn writing_report_does_not_log_employee_name() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let dir = tempfile::tempdir().unwrap();
    let record = employee(Some(80.0), Some(60_000_000.0));
    let package = generate_package(record.risk, record.salary);
    let roi = estimate_roi(record.salary);
    let report = RetentionReport::new("김민수", &record, &package, &roi, &ChecklistProgress::new());
    let path = dir.path().join(report_file_name("김민수"));
    tracing::subscriber::with_default(subscriber, || report.write(&path).unwrap());

    let text = logs.text();
    assert!(text.contains("retention report written"), "{text}");
    assert!(!text.contains("김민수"), "{text}");
    assert!(!text.contains("retention_report_"), "{text}");
    assert!(path.exists());
}

#[test]
fn empty_export_writes_nothing() {
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtered_hr_data.csv");
    let empty = DataFrame::new(vec![
        Series::new("성명".into(), Vec::<String>::new()).into_column(),
    ])
    .unwrap();
    assert!(!write_csv(&empty, &path).unwrap());
    assert!(!path.exists());
}

proptest! {
    #[test]
    fn roi_total_is_component_sum(salary in proptest::option::of(-1.0e10..1.0e10f64)) {
        let roi = estimate_roi(salary);
        prop_assert_eq!(roi.total, roi.recruiting + roi.training + roi.lost_productivity);
        if salary.is_none() {
            prop_assert_eq!(roi.total, 0.0);
        }
    }

    #[test]
    fn tier_is_monotonic_in_risk(a in 0.0..100.0f64, b in 0.0..100.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(generate_package(Some(low), None).tier <= generate_package(Some(high), None).tier);
    }
}
