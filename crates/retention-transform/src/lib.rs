//! Transformations over a loaded HR table.
//!
//! The normalized polars frame is projected onto typed [`EmployeeRecord`]s
//! once per pass; filtering, analytics and ranking all work on those records.

pub mod analytics;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod options;
pub mod priority;
pub mod record;

pub use analytics::{
    Analytics, CategoryCount, KpiSummary, Metric, RISK_BUCKETS, RiskBucket, analyze,
    compute_kpis, grade_distribution, group_thousands, level_distribution, risk_buckets,
};
pub use error::{Result, TransformError};
pub use filter::{FilterOutcome, MISSING_RANGE_VALUE, filter_table, passes};
pub use normalize::{normalize_table, parse_numeric};
pub use options::filter_options;
pub use priority::{
    PRIORITY_FIELDS, PRIORITY_LIMIT, PriorityList, employee_names, find_employee, rank_records,
    talent_rank,
};
pub use record::{EmployeeRecord, ResolvedColumns, extract_records};
