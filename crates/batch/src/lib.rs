pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod runner;

pub use cli::Cli;
pub use config::AppConfig;
pub use metrics::{BatchMetrics, BatchSummary};
pub use runner::{annotate_all, run, run_with};
