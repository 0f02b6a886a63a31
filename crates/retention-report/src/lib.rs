//! Retention packages and the artifacts built from them.
//!
//! - [`generate_package`] / [`estimate_roi`]: pure functions of risk and salary.
//! - [`ChecklistProgress`]: which actions of a package were completed.
//! - [`RetentionReport`]: the JSON document for one employee.
//! - [`export_csv`]: the filtered table as a BOM-prefixed CSV.

pub mod checklist;
pub mod contact;
pub mod error;
pub mod export;
pub mod package;
pub mod report;

pub use checklist::{ChecklistProgress, ChecklistSection};
pub use contact::{ContactLinks, mailto_link, tel_link};
pub use error::{ReportError, Result};
pub use export::{EXPORT_FILE_NAME, export_csv, write_csv};
pub use package::{
    BUDGET_SCALE, budget_for, budget_fraction, estimate_roi, expected_loss_saved,
    follow_up_actions, generate_package, immediate_actions, tier_for_risk, tier_timeline,
    tier_title,
};
pub use report::{RetentionReport, report_file_name};
