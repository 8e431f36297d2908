//! Domain error types.

mod screen_error;

pub use screen_error::ScreenError;
