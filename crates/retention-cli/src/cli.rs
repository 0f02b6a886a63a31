//! CLI argument definitions for the retention dashboard.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use retention_ingest::DEFAULT_LOCAL_FILE;
use retention_model::{
    AGE_BOUNDS, DEFAULT_RISK_THRESHOLD, FieldKey, FilterCriteria, ModelError, NumericRange,
    TENURE_BOUNDS,
};
use retention_transform::PRIORITY_LIMIT;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "retention",
    version,
    about = "HR retention dashboard - filter, rank and package at-risk employees",
    long_about = "Load an HR analysis table (CSV or spreadsheet), reconcile its headers onto\n\
                  the canonical fields, filter it, and build retention packages for the\n\
                  employees most likely to leave."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow employee names, phone numbers and emails in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging configuration with consistent precedence: `--log-level` beats
    /// `-v`/`-q`, and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let mut config = LogConfig::default()
            .with_level_filter(level_filter)
            .with_format(format)
            .with_log_file(self.log_file.clone())
            .with_log_data(self.log_data);
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the table was decoded and how its headers were mapped.
    Inspect(InspectArgs),

    /// Filter the table and print KPIs, distributions and the priority list.
    Dashboard(DashboardArgs),

    /// Build the retention package and report for one employee.
    Package(PackageArgs),
}

/// Input table plus mapping overrides.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// HR table to load (CSV, xlsx, xls, xlsb or ods).
    #[arg(value_name = "INPUT", default_value = DEFAULT_LOCAL_FILE)]
    pub input: PathBuf,

    /// Override the inferred mapping (`field=header`; `field=` unmaps).
    #[arg(long = "map", value_name = "FIELD=HEADER")]
    pub map: Vec<String>,
}

/// Filter controls, starting from the dashboard's initial state.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive substring over name, org, team, talent and risk reason.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    #[arg(long = "org", value_name = "VALUE")]
    pub org: Vec<String>,

    #[arg(long = "team", value_name = "VALUE")]
    pub team: Vec<String>,

    #[arg(long = "grade", value_name = "VALUE")]
    pub grade: Vec<String>,

    #[arg(long = "level", value_name = "VALUE")]
    pub level: Vec<String>,

    #[arg(long = "talent", value_name = "VALUE")]
    pub talent: Vec<String>,

    #[arg(long = "reason", value_name = "VALUE")]
    pub reason: Vec<String>,

    /// Minimum risk score (inclusive).
    #[arg(long = "risk-threshold", value_name = "SCORE", default_value_t = DEFAULT_RISK_THRESHOLD)]
    pub risk_threshold: f64,

    /// Keep only Critical and High talent (the default).
    #[arg(long = "key-talent-only", conflicts_with = "all_talent")]
    pub key_talent_only: bool,

    /// Keep every talent grade.
    #[arg(long = "all-talent")]
    pub all_talent: bool,

    #[arg(long = "age-min", value_name = "YEARS")]
    pub age_min: Option<f64>,

    #[arg(long = "age-max", value_name = "YEARS")]
    pub age_max: Option<f64>,

    #[arg(long = "tenure-min", value_name = "YEARS")]
    pub tenure_min: Option<f64>,

    #[arg(long = "tenure-max", value_name = "YEARS")]
    pub tenure_max: Option<f64>,
}

impl FilterArgs {
    /// Builds the criteria these flags describe.
    pub fn to_criteria(&self) -> Result<FilterCriteria, ModelError> {
        let mut criteria = FilterCriteria::dashboard()
            .with_search(self.search.clone().unwrap_or_default())
            .with_risk_threshold(self.risk_threshold)
            .with_key_talent_only(self.key_talent_only || !self.all_talent)
            .with_age_range(Some(NumericRange::new(
                self.age_min.unwrap_or(AGE_BOUNDS.min),
                self.age_max.unwrap_or(AGE_BOUNDS.max),
            )?))
            .with_tenure_range(Some(NumericRange::new(
                self.tenure_min.unwrap_or(TENURE_BOUNDS.min),
                self.tenure_max.unwrap_or(TENURE_BOUNDS.max),
            )?));
        let selections = [
            (FieldKey::Org, &self.org),
            (FieldKey::Team, &self.team),
            (FieldKey::Grade, &self.grade),
            (FieldKey::Level, &self.level),
            (FieldKey::Talent, &self.talent),
            (FieldKey::RiskReason, &self.reason),
        ];
        for (key, values) in selections {
            criteria.select(key, values.iter().cloned())?;
        }
        Ok(criteria)
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of data rows to preview.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,

    /// Fuzzy header suggestions shown per unmapped field.
    #[arg(long = "suggestions", default_value_t = 3)]
    pub suggestions: usize,
}

#[derive(Parser)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write the filtered rows as CSV (skipped when nothing matched).
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Rows shown in the priority list.
    #[arg(long = "limit", default_value_t = PRIORITY_LIMIT)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct PackageArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Employee name as shown in the priority list.
    #[arg(long = "employee", value_name = "NAME")]
    pub employee: String,

    /// Mark an immediate action done (0-based, repeatable).
    #[arg(long = "done-immediate", value_name = "INDEX")]
    pub done_immediate: Vec<usize>,

    /// Mark a follow-up action done (0-based, repeatable).
    #[arg(long = "done-follow", value_name = "INDEX")]
    pub done_follow: Vec<usize>,

    /// Report path (default: retention_report_<employee>.json).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
