//! Multiscreen - screen lifecycle management for terminal applications.
//!
//! This crate keeps a registry of named screens, each a view paired with a
//! controller, and switches the displayed screen either immediately or
//! through an animated transition. Controllers receive lifecycle hooks in a
//! fixed order, and overlays (loading indicator, shade) stack above the
//! displayed screen.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the screen manager and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing configuration, view bundles and transitions.
pub mod infrastructure;
/// Presentation layer containing the terminal shell.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "multiscreen";
