use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use retention_map::FieldStatus;
use retention_model::{FieldKey, RetentionAction, UNMAPPED_LABEL, UrgencyTier};
use retention_report::{ChecklistProgress, ChecklistSection, expected_loss_saved, tier_for_risk};
use retention_transform::{CategoryCount, EmployeeRecord, KpiSummary, Metric, group_thousands};

use crate::types::{DashboardResult, InspectResult, PackageResult};

pub fn print_inspect(result: &InspectResult) {
    println!("{}", result.diagnostic.message());
    println!("Source: {}", result.diagnostic.source);
    println!("Shape: {} rows x {} columns", result.rows, result.columns);
    println!("{}", result.preview);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Header"),
        header_cell("Status"),
        header_cell("Suggestions"),
    ]);
    apply_table_style(&mut table);
    let mapping = result.mapping.mapping();
    for key in FieldKey::ALL {
        let field = if key.is_required() {
            Cell::new(format!("{key} *"))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(key.as_str())
        };
        let header = match mapping.get(key) {
            Some(header) => Cell::new(header),
            None if key.is_required() => Cell::new(UNMAPPED_LABEL)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell(UNMAPPED_LABEL),
        };
        let suggestions = result
            .suggestions
            .get(&key)
            .filter(|list| !list.is_empty())
            .map(|list| {
                list.iter()
                    .map(|s| format!("{} ({:.2})", s.header, s.score))
                    .collect::<Vec<_>>()
                    .join(", ")
            });
        table.add_row(vec![
            field,
            Cell::new(key.label()),
            header,
            status_cell(result.mapping.status(key)),
            suggestions.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("Mapping (* required):");
    println!("{table}");

    let missing = result.mapping.summary().missing_required;
    if !missing.is_empty() {
        let names: Vec<String> = missing
            .iter()
            .map(|key| format!("{} ({key})", key.label()))
            .collect();
        eprintln!("Required fields not mapped: {}", names.join(", "));
    }
}

pub fn print_dashboard(result: &DashboardResult) {
    let view = &result.view;
    println!("{}", result.diagnostic.message());
    println!("Filtered: {} / {}", view.matched(), view.total);

    println!("{}", kpi_table(&view.analytics.kpis));
    println!("{}", counts_table(FieldKey::Grade.label(), view.analytics.grade.as_deref()));
    println!("{}", counts_table(FieldKey::Level.label(), view.analytics.level.as_deref()));

    let mut buckets = Table::new();
    buckets.set_header(vec![header_cell("Risk"), header_cell("Employees")]);
    apply_table_style(&mut buckets);
    align_column(&mut buckets, 1, CellAlignment::Right);
    for bucket in &view.analytics.risk_buckets {
        buckets.add_row(vec![Cell::new(bucket.label), count_cell(bucket.count)]);
    }
    println!("{buckets}");

    print_priority(&view.priority.columns, &view.priority.rows);
    if let Some(path) = &result.exported {
        println!("Exported: {}", path.display());
    }
}

fn kpi_table(kpis: &KpiSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Headcount"),
        header_cell("Avg risk"),
        header_cell("Avg tenure (yrs)"),
        header_cell("Avg salary"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(kpis.headcount).add_attribute(Attribute::Bold),
        metric_cell(kpis.avg_risk, |m| m.format_fixed(1)),
        metric_cell(kpis.avg_tenure, |m| m.format_fixed(2)),
        metric_cell(kpis.avg_salary, Metric::format_grouped),
    ]);
    table
}

/// Formatted value, or the metric's own placeholder (`no data`, `unavailable`).
fn metric_cell(metric: Metric, format: impl Fn(Metric) -> String) -> Cell {
    match metric {
        Metric::Value(_) => Cell::new(format(metric)),
        Metric::NoData | Metric::Unavailable => dim_cell(metric),
    }
}

/// Distribution table; `None` means the field is unmapped.
fn counts_table(title: &str, counts: Option<&[CategoryCount]>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("Employees")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    match counts {
        Some(counts) => {
            for entry in counts {
                table.add_row(vec![Cell::new(&entry.value), count_cell(entry.count)]);
            }
        }
        None => {
            table.add_row(vec![dim_cell(Metric::Unavailable), dim_cell("-")]);
        }
    }
    table
}

fn print_priority(columns: &[FieldKey], rows: &[EmployeeRecord]) {
    if columns.is_empty() || rows.is_empty() {
        println!("Priority list: no matching employees");
        return;
    }
    let mut table = Table::new();
    table.set_header(columns.iter().map(|key| header_cell(key.label())));
    apply_summary_table_style(&mut table);
    for (index, key) in columns.iter().enumerate() {
        if key.is_numeric() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in rows {
        table.add_row(columns.iter().map(|key| priority_cell(*key, row)));
    }
    println!("Priority list:");
    println!("{table}");
}

fn priority_cell(key: FieldKey, row: &EmployeeRecord) -> Cell {
    let value = match key {
        FieldKey::Salary => row.salary.map(group_thousands),
        _ => row.text(key),
    };
    match value {
        Some(value) if key == FieldKey::Risk => Cell::new(value).fg(tier_color(tier_for_risk(row.risk))),
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn print_package(result: &PackageResult) {
    let package = &result.package;
    let card = &package.package;

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        Cell::new(&card.title)
            .fg(tier_color(card.tier))
            .add_attribute(Attribute::Bold),
        Cell::new(&package.employee).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Tier"), Cell::new(card.tier)]);
    table.add_row(vec![
        Cell::new("Org"),
        Cell::new(package.record.org.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        Cell::new("Risk"),
        Cell::new(package.record.text(FieldKey::Risk).unwrap_or_else(|| "-".to_string())),
    ]);
    table.add_row(vec![
        Cell::new("Budget"),
        Cell::new(format!("{}만원", group_thousands(card.budget as f64))),
    ]);
    table.add_row(vec![Cell::new("Timeline"), Cell::new(&card.timeline)]);
    table.add_row(vec![
        Cell::new("Expected loss saved"),
        Cell::new(format!(
            "{}만원",
            group_thousands(expected_loss_saved(&package.roi) as f64)
        )),
    ]);
    println!("{table}");

    print_checklist(
        "Immediate actions",
        &card.immediate,
        &result.progress,
        ChecklistSection::Immediate,
    );
    print_checklist(
        "Follow-up actions",
        &card.follow_up,
        &result.progress,
        ChecklistSection::FollowUp,
    );

    let roi = &package.roi;
    let mut costs = Table::new();
    costs.set_header(vec![header_cell("Replacement cost"), header_cell("Amount")]);
    apply_table_style(&mut costs);
    align_column(&mut costs, 1, CellAlignment::Right);
    for (label, amount) in [
        ("Recruiting", roi.recruiting),
        ("Training", roi.training),
        ("Lost productivity", roi.lost_productivity),
        ("Total", roi.total),
    ] {
        costs.add_row(vec![Cell::new(label), Cell::new(group_thousands(amount))]);
    }
    println!("{costs}");

    if let Some(link) = &package.contact.email {
        println!("Email: {link}");
    }
    if let Some(link) = &package.contact.phone {
        println!("Phone: {link}");
    }
    println!("Report: {}", result.report_path.display());
}

fn print_checklist(
    title: &str,
    actions: &[RetentionAction],
    progress: &ChecklistProgress,
    section: ChecklistSection,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(title),
        header_cell("Owner"),
        header_cell("Deadline"),
        header_cell("Done"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for (index, action) in actions.iter().enumerate() {
        let done = if progress.is_done(section, index) {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&action.description),
            Cell::new(&action.responsible),
            Cell::new(&action.deadline),
            done,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: FieldStatus) -> Cell {
    match status {
        FieldStatus::Inferred => Cell::new("inferred").fg(Color::Green),
        FieldStatus::Manual => Cell::new("manual").fg(Color::Cyan),
        FieldStatus::Unmapped => dim_cell("unmapped"),
    }
}

fn tier_color(tier: UrgencyTier) -> Color {
    match tier {
        UrgencyTier::Critical => Color::Red,
        UrgencyTier::High => Color::Yellow,
        UrgencyTier::Medium => Color::Blue,
        UrgencyTier::Low => Color::Green,
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
