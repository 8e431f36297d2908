use super::app_config::{LogLevel, TransitionKind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "multiscreen",
    version,
    about = "Screen lifecycle manager with animated transitions",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// View bundle directory or packed bundle file.
    #[arg(short, long, value_name = "PATH")]
    pub views_path: Option<PathBuf>,

    /// Stylesheet skin.
    #[arg(long)]
    pub skin: Option<String>,

    /// Screen shown at startup.
    #[arg(short, long, value_name = "NAME")]
    pub initial_screen: Option<String>,

    /// Animate screen switches.
    #[arg(long)]
    pub enable_animations: Option<bool>,

    /// Animation used for screen switches.
    #[arg(long, value_enum)]
    pub transition: Option<TransitionKind>,

    /// Transition length in milliseconds.
    #[arg(long, value_name = "MS")]
    pub transition_duration_ms: Option<u64>,
}
