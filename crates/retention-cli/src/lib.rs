//! CLI library components for the retention dashboard.

pub mod cli;
pub mod logging;
