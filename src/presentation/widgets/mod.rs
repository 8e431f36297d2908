//! Reusable widgets.

mod footer_bar;
mod host_view;

pub use footer_bar::{FooterBar, FooterBarStyle, KeyHint, SHELL_HINTS};
pub use host_view::{HostView, HostViewStyle};
