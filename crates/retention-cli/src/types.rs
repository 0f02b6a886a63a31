use std::collections::BTreeMap;
use std::path::PathBuf;

use polars::prelude::DataFrame;
use retention_core::{DashboardView, EmployeePackage};
use retention_ingest::LoadDiagnostic;
use retention_map::{HeaderSuggestion, MappingState};
use retention_model::FieldKey;
use retention_report::ChecklistProgress;

/// Result of `retention inspect`.
#[derive(Debug)]
pub struct InspectResult {
    pub diagnostic: LoadDiagnostic,
    pub rows: usize,
    pub columns: usize,
    pub preview: DataFrame,
    pub mapping: MappingState,
    /// Ranked headers for each unmapped field.
    pub suggestions: BTreeMap<FieldKey, Vec<HeaderSuggestion>>,
}

impl InspectResult {
    /// Required fields are unmapped; nothing downstream can run.
    pub fn is_blocked(&self) -> bool {
        !self.mapping.summary().missing_required.is_empty()
    }
}

/// Result of `retention dashboard`.
#[derive(Debug)]
pub struct DashboardResult {
    pub diagnostic: LoadDiagnostic,
    pub view: DashboardView,
    pub exported: Option<PathBuf>,
}

/// Result of `retention package`.
#[derive(Debug)]
pub struct PackageResult {
    pub package: EmployeePackage,
    pub progress: ChecklistProgress,
    pub report_path: PathBuf,
}
