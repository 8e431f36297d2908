//! UI shell.

mod app;

pub use app::App;
