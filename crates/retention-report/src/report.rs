//! Per-employee retention report document.

use std::path::Path;

use retention_model::{RetentionPackage, RoiEstimate};
use retention_transform::EmployeeRecord;
use serde::Serialize;
use tracing::info;

use crate::checklist::{ChecklistProgress, ChecklistSection};
use crate::error::{ReportError, Result};
use crate::package::expected_loss_saved;

/// JSON document handed to the user after working through a package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionReport {
    pub employee: String,
    pub org: Option<String>,
    /// `None` when talent is unmapped or missing.
    pub talent: Option<String>,
    pub risk: Option<f64>,
    #[serde(rename = "budget(만원)")]
    pub budget: i64,
    #[serde(rename = "expected_loss_saved(만원)")]
    pub expected_loss_saved: i64,
    pub completed_immediate: Vec<String>,
    pub completed_follow: Vec<String>,
}

impl RetentionReport {
    pub fn new(
        employee: &str,
        record: &EmployeeRecord,
        package: &RetentionPackage,
        roi: &RoiEstimate,
        progress: &ChecklistProgress,
    ) -> Self {
        let descriptions = |section: ChecklistSection| -> Vec<String> {
            progress
                .completed(package, section)
                .into_iter()
                .map(|action| action.description.clone())
                .collect()
        };
        Self {
            employee: employee.to_string(),
            org: record.org.clone(),
            talent: record.talent.clone(),
            risk: record.risk,
            budget: package.budget,
            expected_loss_saved: expected_loss_saved(roi),
            completed_immediate: descriptions(ChecklistSection::Immediate),
            completed_follow: descriptions(ChecklistSection::FollowUp),
        }
    }

    /// Pretty-printed JSON with non-ASCII text kept as is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, &json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        // The file name embeds the employee name, so only the size is logged.
        info!(bytes = json.len(), "retention report written");
        Ok(())
    }
}

/// Suggested file name, with path separators replaced.
pub fn report_file_name(employee: &str) -> String {
    let safe: String = employee
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    format!("retention_report_{safe}.json")
}
