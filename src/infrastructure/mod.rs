//! Infrastructure layer with adapters for configuration, view bundles and
//! transitions.

/// Application configuration.
pub mod config;
/// Screen transition engines.
pub mod transitions;
/// View bundles and view definition loading.
pub mod views;

pub use config::{
    AppConfig, CliArgs, ConfigError, ConfigSource, ConfigStore, LogLevel, TransitionKind,
};
pub use transitions::{FadeTransition, SlideDirection, SlideTransition};
pub use views::{
    ControllerRegistry, DirectoryBundle, PackedBundle, TomlViewLoader, open_bundle,
};
