pub mod screen_manager;

pub use screen_manager::{DEFAULT_SKIN, InitReport, ScreenInstance, ScreenManager, loaded};

#[cfg(test)]
mod screen_manager_test;
