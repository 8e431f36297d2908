//! View bundle port definition.

use crate::domain::ScreenName;
use crate::domain::entities::ViewResource;
use crate::domain::errors::ScreenError;

/// Port for convention-based discovery of view definitions.
#[cfg_attr(test, mockall::automock)]
pub trait ViewBundle {
    /// Human readable bundle location.
    fn location(&self) -> String;

    /// Lists all view definitions keyed by normalized screen name, in a
    /// stable order.
    ///
    /// # Errors
    /// Returns `ScreenError::ResourceResolution` if the bundle cannot be read.
    fn discover_views(&self) -> Result<Vec<(ScreenName, ViewResource)>, ScreenError>;

    /// Resolves a bundle-relative path such as `skin/default/css/home.css`.
    fn resolve(&self, path: &str) -> Option<ViewResource>;
}
