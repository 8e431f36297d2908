//! Navigation state and screen requests.

use std::fmt;

use crate::domain::ScreenName;
use crate::domain::ports::ScreenTransition;

/// Previous and current screen, always updated as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    previous: Option<ScreenName>,
    current: Option<ScreenName>,
}

impl NavigationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `next` as the show target. The old current screen becomes the
    /// previous one even when it equals `next`.
    pub fn advance(&mut self, next: ScreenName) {
        self.previous = self.current.replace(next);
    }

    #[must_use]
    pub const fn current(&self) -> Option<&ScreenName> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn previous(&self) -> Option<&ScreenName> {
        self.previous.as_ref()
    }

    #[must_use]
    pub fn current_matches(&self, name: &str) -> bool {
        self.current.as_ref().is_some_and(|current| current.matches(name))
    }

    #[must_use]
    pub fn previous_matches(&self, name: &str) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|previous| previous.matches(name))
    }
}

/// Work a controller asks the screen manager to perform.
pub enum ScreenRequest {
    Show(ScreenName),
    ShowWith(ScreenName, Box<dyn ScreenTransition>),
    ShowLoadingIndicator,
    HideLoadingIndicator,
    Shade,
    Unshade,
}

impl ScreenRequest {
    /// Returns whether the request changes the displayed screen.
    #[must_use]
    pub const fn is_show(&self) -> bool {
        matches!(self, Self::Show(_) | Self::ShowWith(..))
    }
}

impl fmt::Debug for ScreenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show(name) => f.debug_tuple("Show").field(name).finish(),
            Self::ShowWith(name, _) => f.debug_tuple("ShowWith").field(name).finish(),
            Self::ShowLoadingIndicator => write!(f, "ShowLoadingIndicator"),
            Self::HideLoadingIndicator => write!(f, "HideLoadingIndicator"),
            Self::Shade => write!(f, "Shade"),
            Self::Unshade => write!(f, "Unshade"),
        }
    }
}
