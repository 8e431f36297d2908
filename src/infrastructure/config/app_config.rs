//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "multiscreen";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "multiscreen";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Animation used when switching screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Cross-fade.
    #[default]
    Fade,
    /// Slide in from the right.
    Slide,
    /// Swap screens instantly.
    None,
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// View bundle: a directory or a packed bundle file.
    #[serde(default)]
    pub views_path: Option<PathBuf>,

    /// Stylesheet skin.
    #[serde(default = "default_skin")]
    pub skin: String,

    /// Screen shown at startup. Defaults to the first discovered screen.
    #[serde(default)]
    pub initial_screen: Option<String>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Animate screen switches.
    #[serde(default = "default_true")]
    pub enable_animations: bool,

    /// Animation used when animations are enabled.
    #[serde(default)]
    pub transition: TransitionKind,

    /// Transition length in milliseconds.
    #[serde(default = "default_transition_duration")]
    pub transition_duration_ms: u64,

    /// Frame interval in milliseconds.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl UiConfig {
    #[must_use]
    pub const fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_animations: true,
            transition: TransitionKind::default(),
            transition_duration_ms: default_transition_duration(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

fn default_skin() -> String {
    crate::application::services::DEFAULT_SKIN.to_string()
}

fn default_true() -> bool {
    true
}

const fn default_transition_duration() -> u64 {
    300
}

const fn default_frame_interval() -> u64 {
    16
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(views_path) = args.views_path {
            self.views_path = Some(views_path);
        }
        if let Some(skin) = args.skin {
            self.skin = skin;
        }
        if let Some(initial_screen) = args.initial_screen {
            self.initial_screen = Some(initial_screen);
        }
        if let Some(enable_animations) = args.enable_animations {
            self.ui.enable_animations = enable_animations;
        }
        if let Some(transition) = args.transition {
            self.ui.transition = transition;
        }
        if let Some(duration) = args.transition_duration_ms {
            self.ui.transition_duration_ms = duration;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(super::storage::CONFIG_FILE_NAME))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("multiscreen.log"))
    }

    /// Returns default view bundle location.
    #[must_use]
    pub fn default_views_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("views"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective view bundle path, falling back to `./views`.
    #[must_use]
    pub fn effective_views_path(&self) -> PathBuf {
        self.views_path
            .clone()
            .or_else(Self::default_views_path)
            .unwrap_or_else(|| PathBuf::from("views"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            views_path: None,
            skin: default_skin(),
            initial_screen: None,
            ui: UiConfig::default(),
        }
    }
}
