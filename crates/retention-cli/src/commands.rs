use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use retention_core::DashboardSession;
use retention_ingest::LoadDiagnostic;
use retention_model::{FieldKey, FilterCriteria};
use retention_report::{ChecklistProgress, ChecklistSection, report_file_name, write_csv};
use tracing::{info, info_span};

use retention_cli::cli::{DashboardArgs, FilterArgs, InputArgs, InspectArgs, PackageArgs};
use retention_cli::logging::redact_value;

use crate::types::{DashboardResult, InspectResult, PackageResult};

/// Loads the input and applies mapping overrides.
fn open_session(
    input: &InputArgs,
    filter: Option<&FilterArgs>,
) -> Result<(DashboardSession, LoadDiagnostic)> {
    let criteria = match filter {
        Some(filter) => filter.to_criteria().context("invalid filter flags")?,
        None => FilterCriteria::dashboard(),
    };
    let mut session = DashboardSession::new().with_criteria(criteria);
    let diagnostic = session
        .load_path(&input.input)
        .with_context(|| format!("load {}", input.input.display()))?
        .clone();
    for spec in &input.map {
        session
            .apply_override(spec)
            .with_context(|| format!("mapping override `{spec}`"))?;
    }
    Ok((session, diagnostic))
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let span = info_span!("inspect", input = %args.input.input.display());
    let _guard = span.enter();

    let (session, diagnostic) = open_session(&args.input, None)?;
    let table = session.table().context("no table loaded")?;
    let mapping = session.mapping().context("no table loaded")?.clone();
    let suggestions: BTreeMap<FieldKey, _> = FieldKey::ALL
        .into_iter()
        .filter(|key| !mapping.mapping().is_mapped(*key))
        .map(|key| (key, mapping.suggestions(key, args.suggestions)))
        .collect();
    Ok(InspectResult {
        diagnostic,
        rows: table.height(),
        columns: table.width(),
        preview: table.frame.head(Some(args.rows)),
        mapping,
        suggestions,
    })
}

pub fn run_dashboard(args: &DashboardArgs) -> Result<DashboardResult> {
    let span = info_span!("dashboard", input = %args.input.input.display());
    let _guard = span.enter();

    let (session, diagnostic) = open_session(&args.input, Some(&args.filter))?;
    let session = session.with_priority_limit(args.limit);
    let view = session.recompute()?;
    let exported = match &args.export_csv {
        Some(path) => {
            let written = write_csv(&view.frame, path)
                .with_context(|| format!("export {}", path.display()))?;
            written.then(|| path.clone())
        }
        None => None,
    };
    Ok(DashboardResult {
        diagnostic,
        view,
        exported,
    })
}

pub fn run_package(args: &PackageArgs) -> Result<PackageResult> {
    let span = info_span!("package", employee = %redact_value(&args.employee));
    let _guard = span.enter();

    let (session, _) = open_session(&args.input, Some(&args.filter))?;
    let package = session.package_for(&args.employee)?;

    let mut progress = ChecklistProgress::new();
    let marks = args
        .done_immediate
        .iter()
        .map(|index| (ChecklistSection::Immediate, *index))
        .chain(
            args.done_follow
                .iter()
                .map(|index| (ChecklistSection::FollowUp, *index)),
        );
    for (section, index) in marks {
        progress.set(&package.package, section, index, true)?;
    }

    let report_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report_file_name(&args.employee)));
    package.report(&progress).write(&report_path)?;
    info!(
        tier = %package.package.tier,
        budget = package.package.budget,
        "retention report written"
    );
    Ok(PackageResult {
        package,
        progress,
        report_path,
    })
}
