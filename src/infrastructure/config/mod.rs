//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, LogLevel, TransitionKind, UiConfig};
pub use args::CliArgs;
pub use storage::{CONFIG_FILE_NAME, ConfigError, ConfigSource, ConfigStore};
