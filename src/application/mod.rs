//! Application layer with the screen manager and use cases.

/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{InitReport, ScreenInstance, ScreenManager};
pub use use_cases::{BootstrapOutcome, BootstrapScreensUseCase};
