//! Domain layer with screens, views, controllers and port definitions.

/// Controller lifecycle contract.
pub mod controller;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Navigation state.
pub mod navigation;
/// Port definitions.
pub mod ports;
/// Screen identifiers.
pub mod screen_name;

pub use controller::{ScreenContext, ScreenController};
pub use errors::ScreenError;
pub use navigation::{NavigationState, ScreenRequest};
pub use screen_name::ScreenName;
