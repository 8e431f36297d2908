//! Use case implementations.

mod bootstrap_screens_use_case;

pub use bootstrap_screens_use_case::{BootstrapOutcome, BootstrapScreensUseCase};
