//! Screen management error types.

use thiserror::Error;

use crate::domain::ScreenName;

/// Screen management error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ScreenError {
    #[error("there is no screen with the name '{name}'")]
    NotFound { name: ScreenName },

    #[error("failed to load view from {resource}: {message}")]
    Load { resource: String, message: String },

    #[error("failed to resolve views from {location}: {message}")]
    ResourceResolution { location: String, message: String },
}

impl ScreenError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(name: impl Into<ScreenName>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates load error.
    #[must_use]
    pub fn load(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Creates resource resolution error.
    #[must_use]
    pub fn resolution(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceResolution {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Returns whether error is a missing screen.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns whether error happened while loading or preparing a screen.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}
