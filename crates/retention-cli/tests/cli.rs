//! Argument parsing and flag-to-criteria conversion.

use clap::Parser;
use std::path::PathBuf;

use retention_cli::cli::{Cli, Command};
use retention_cli::logging::LogFormat;
use retention_model::{AGE_BOUNDS, FieldKey, FilterCriteria, NumericRange};
use tracing::level_filters::LevelFilter;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("retention").chain(args.iter().copied())).unwrap()
}

#[test]
fn dashboard_defaults_match_initial_filter_state() {
    let cli = parse(&["dashboard"]);
    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard");
    };
    assert_eq!(args.input.input.to_str(), Some("hr_analysis_results.csv"));
    assert!(args.input.map.is_empty());
    assert_eq!(args.filter.to_criteria().unwrap(), FilterCriteria::dashboard());
    assert_eq!(args.limit, 200);
}

#[test]
fn filter_flags_build_criteria() {
    let cli = parse(&[
        "dashboard",
        "hr.csv",
        "--map",
        "risk=score",
        "--search",
        "Kim",
        "--org",
        "영업본부",
        "--org",
        "개발본부",
        "--risk-threshold",
        "50",
        "--all-talent",
        "--age-max",
        "40",
    ]);
    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard");
    };
    assert_eq!(args.input.map, vec!["risk=score"]);
    let criteria = args.filter.to_criteria().unwrap();
    assert_eq!(criteria.search, "Kim");
    assert_eq!(criteria.risk_threshold, 50.0);
    assert!(!criteria.key_talent_only);
    assert_eq!(
        criteria.age_range,
        Some(NumericRange {
            min: AGE_BOUNDS.min,
            max: 40.0
        })
    );
    assert_eq!(criteria.selection(FieldKey::Org).map(|s| s.len()), Some(2));
    assert!(criteria.selection(FieldKey::Team).is_none());
}

#[test]
fn inverted_range_is_rejected() {
    let cli = parse(&["dashboard", "--tenure-min", "10", "--tenure-max", "5"]);
    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard");
    };
    assert!(args.filter.to_criteria().is_err());
}

#[test]
fn talent_toggles_conflict() {
    let result = Cli::try_parse_from([
        "retention",
        "dashboard",
        "--key-talent-only",
        "--all-talent",
    ]);
    assert!(result.is_err());
}

#[test]
fn explicit_key_talent_flag_keeps_key_talent() {
    let cli = parse(&["dashboard", "--key-talent-only"]);
    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard");
    };
    assert!(args.filter.key_talent_only);
    assert!(args.filter.to_criteria().unwrap().key_talent_only);
}

#[test]
fn log_flags_build_log_config() {
    let cli = parse(&[
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "retention.log",
        "--log-data",
        "--color",
        "never",
        "inspect",
    ]);
    let config = cli.log_config();
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.log_file, Some(PathBuf::from("retention.log")));
    assert!(config.log_data);
    assert!(!config.use_env_filter);
    assert!(!config.with_ansi);
}

#[test]
fn default_log_config_defers_to_rust_log() {
    let config = parse(&["inspect"]).log_config();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.log_file.is_none());
    assert!(!config.log_data);
    assert!(config.use_env_filter);

    let verbose = parse(&["-vv", "inspect"]).log_config();
    assert_eq!(verbose.level_filter, LevelFilter::DEBUG);
    assert!(!verbose.use_env_filter);
}

#[test]
fn package_requires_employee() {
    assert!(Cli::try_parse_from(["retention", "package", "hr.csv"]).is_err());

    let cli = parse(&[
        "package",
        "hr.csv",
        "--employee",
        "김민수",
        "--done-immediate",
        "0",
        "--done-immediate",
        "2",
        "--done-follow",
        "0",
        "--log-data",
    ]);
    assert!(cli.log_data);
    let Command::Package(args) = cli.command else {
        panic!("expected package");
    };
    assert_eq!(args.employee, "김민수");
    assert_eq!(args.done_immediate, vec![0, 2]);
    assert_eq!(args.done_follow, vec![0]);
    assert!(args.output.is_none());
}
