//! Presentation layer with the terminal shell and event handling.

/// Demo screen controllers.
pub mod controllers;
/// Event handling.
pub mod events;
/// UI shell.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use controllers::demo_registry;
pub use ui::App;
