//! Explicit dashboard state and the recomputation pipeline.
//!
//! # Architecture
//!
//! A [`DashboardSession`] owns everything that survives between user
//! interactions:
//!
//! - **Table**: the last successfully decoded [`LoadedTable`]
//! - **Mapping**: a [`MappingState`] rebuilt from the table headers on load
//! - **Criteria**: the current [`FilterCriteria`]
//!
//! Loading a table replaces it wholesale and discards mapping overrides.
//! Mapping edits and criteria changes mutate in place. Derived data is never
//! cached: [`DashboardSession::recompute`] runs the whole pipeline from the
//! stored table every time and returns a fresh [`DashboardView`].

use std::collections::BTreeMap;
use std::path::Path;

use retention_ingest::{LoadDiagnostic, LoadedTable, load_path, load_table};
use retention_map::{MappingState, MappingSummary};
use retention_model::{FieldKey, FilterCriteria};
use retention_transform::{
    PRIORITY_LIMIT, PriorityList, ResolvedColumns, analyze, extract_records, filter_options,
    filter_table, normalize_table, rank_records,
};
use tracing::{info, info_span, warn};

use crate::error::{Result, SessionError};
use crate::view::{DashboardView, EmployeePackage};

#[derive(Debug, Clone)]
struct Dataset {
    table: LoadedTable,
    mapping: MappingState,
}

/// State of one dashboard user.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Option<Dataset>,
    criteria: FilterCriteria,
    priority_limit: usize,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSession {
    /// Empty session with the dashboard's initial filter state.
    pub fn new() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::dashboard(),
            priority_limit: PRIORITY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn with_priority_limit(mut self, limit: usize) -> Self {
        self.priority_limit = limit;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: LoadedTable) -> Self {
        self.load(table);
        self
    }

    /// Installs `table`, inferring a fresh mapping from its headers.
    pub fn load(&mut self, table: LoadedTable) {
        let mapping = MappingState::from_headers(table.headers());
        let summary = mapping.summary();
        info!(
            source = %table.diagnostic.source,
            rows = table.height(),
            mapped = summary.mapped,
            "table installed"
        );
        self.dataset = Some(Dataset { table, mapping });
    }

    /// Decodes uploaded bytes and installs the result.
    ///
    /// A failed load clears the previous table: nothing is shown until a
    /// readable file arrives.
    pub fn load_bytes(&mut self, bytes: &[u8], filename: &str) -> Result<&LoadDiagnostic> {
        let loaded = load_table(bytes, filename);
        self.install(loaded)
    }

    /// Reads a local file and installs the result.
    pub fn load_path(&mut self, path: &Path) -> Result<&LoadDiagnostic> {
        let loaded = load_path(path);
        self.install(loaded)
    }

    fn install(
        &mut self,
        loaded: retention_ingest::Result<LoadedTable>,
    ) -> Result<&LoadDiagnostic> {
        match loaded {
            Ok(table) => {
                self.load(table);
                self.diagnostic().ok_or(SessionError::NoTable)
            }
            Err(error) => {
                warn!(%error, "load failed; table cleared");
                self.dataset = None;
                Err(error.into())
            }
        }
    }

    pub fn table(&self) -> Option<&LoadedTable> {
        self.dataset.as_ref().map(|dataset| &dataset.table)
    }

    pub fn diagnostic(&self) -> Option<&LoadDiagnostic> {
        self.table().map(|table| &table.diagnostic)
    }

    pub fn mapping(&self) -> Option<&MappingState> {
        self.dataset.as_ref().map(|dataset| &dataset.mapping)
    }

    pub fn mapping_summary(&self) -> Option<MappingSummary> {
        self.mapping().map(MappingState::summary)
    }

    fn dataset_mut(&mut self) -> Result<&mut Dataset> {
        self.dataset.as_mut().ok_or(SessionError::NoTable)
    }

    /// Points `key` at `header`, or unmaps it with `None`.
    pub fn assign(&mut self, key: FieldKey, header: Option<&str>) -> Result<()> {
        self.dataset_mut()?.mapping.assign(key, header)?;
        Ok(())
    }

    /// Applies a `field=header` override.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        self.dataset_mut()?.mapping.apply_override(spec)?;
        Ok(())
    }

    /// Drops every override and returns to the inferred mapping.
    pub fn reset_mapping(&mut self) -> Result<()> {
        self.dataset_mut()?.mapping.reset();
        Ok(())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Selectable values per categorical field, drawn from the whole table.
    pub fn filter_options(&self) -> Result<BTreeMap<FieldKey, Vec<String>>> {
        let dataset = self.ready()?;
        let mapping = dataset.mapping.mapping();
        let normalized = normalize_table(&dataset.table.frame, mapping)?;
        let resolved = ResolvedColumns::from_frame(mapping, &normalized);
        let records = extract_records(&normalized, &resolved)?;
        Ok(filter_options(&records, &resolved))
    }

    /// Runs normalize, filter, analyze and rank against the stored table.
    pub fn recompute(&self) -> Result<DashboardView> {
        let dataset = self.ready()?;
        let span = info_span!("recompute", rows = dataset.table.height());
        let _guard = span.enter();

        let mapping = dataset.mapping.mapping().clone();
        let normalized = normalize_table(&dataset.table.frame, &mapping)?;
        let resolved = ResolvedColumns::from_frame(&mapping, &normalized);
        let outcome = filter_table(&normalized, &mapping, &self.criteria)?;
        let analytics = analyze(&outcome.records, &resolved);
        let total = outcome.total;
        let frame = outcome.frame;
        let ranked = rank_records(outcome.records, &resolved);
        let priority = PriorityList::from_ranked(&ranked, &resolved, self.priority_limit);

        info!(
            matched = ranked.len(),
            total,
            headcount = analytics.kpis.headcount,
            "dashboard recomputed"
        );
        Ok(DashboardView {
            mapping,
            resolved,
            frame,
            total,
            analytics,
            ranked,
            priority,
        })
    }

    /// Recomputes and builds the package for `employee`.
    pub fn package_for(&self, employee: &str) -> Result<EmployeePackage> {
        self.recompute()?.package_for(employee)
    }

    fn ready(&self) -> Result<&Dataset> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoTable)?;
        dataset.mapping.validate_required()?;
        Ok(dataset)
    }
}
