//! Everything the presentation layer renders for one recomputation.

use polars::prelude::DataFrame;
use retention_model::{ColumnMapping, RetentionPackage, RoiEstimate};
use retention_report::{
    ChecklistProgress, ContactLinks, RetentionReport, estimate_roi, export_csv, generate_package,
};
use retention_transform::{
    Analytics, EmployeeRecord, PriorityList, ResolvedColumns, employee_names, find_employee,
};

use crate::error::{Result, SessionError};

/// Output of [`crate::DashboardSession::recompute`].
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub mapping: ColumnMapping,
    pub resolved: ResolvedColumns,
    /// Filtered rows of the normalized table.
    pub frame: DataFrame,
    pub total: usize,
    pub analytics: Analytics,
    /// Filtered records in priority order.
    pub ranked: Vec<EmployeeRecord>,
    pub priority: PriorityList,
}

impl DashboardView {
    pub fn matched(&self) -> usize {
        self.ranked.len()
    }

    /// Names offered by the employee selector, in priority order.
    pub fn employee_names(&self) -> Vec<String> {
        employee_names(&self.ranked)
    }

    pub fn employee(&self, name: &str) -> Option<&EmployeeRecord> {
        find_employee(&self.ranked, name)
    }

    /// Package, ROI and contact links for the first filtered row named `name`.
    pub fn package_for(&self, name: &str) -> Result<EmployeePackage> {
        let record = self
            .employee(name)
            .ok_or_else(|| SessionError::UnknownEmployee(name.to_string()))?;
        Ok(EmployeePackage::new(name, record))
    }

    /// BOM-prefixed CSV of the filtered rows; `None` when nothing matched.
    pub fn export_csv(&self) -> Result<Option<Vec<u8>>> {
        Ok(export_csv(&self.frame)?)
    }
}

/// Recommendation for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeePackage {
    pub employee: String,
    pub record: EmployeeRecord,
    pub package: RetentionPackage,
    pub roi: RoiEstimate,
    pub contact: ContactLinks,
}

impl EmployeePackage {
    pub fn new(employee: &str, record: &EmployeeRecord) -> Self {
        Self {
            employee: employee.to_string(),
            record: record.clone(),
            package: generate_package(record.risk, record.salary),
            roi: estimate_roi(record.salary),
            contact: ContactLinks::for_record(record, employee),
        }
    }

    pub fn report(&self, progress: &ChecklistProgress) -> RetentionReport {
        RetentionReport::new(
            &self.employee,
            &self.record,
            &self.package,
            &self.roi,
            progress,
        )
    }
}
