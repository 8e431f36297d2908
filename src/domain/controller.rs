//! Screen controller lifecycle contract.
//!
//! A controller is created together with its view by a [`ViewLoader`] and is
//! registered with the screen manager under the screen's name. The manager
//! drives the hooks in this order:
//!
//! ```text
//! register:     attach -> prepare
//! first show:   on_before_first_show -> on_before_show -> [insert] -> on_first_show -> on_show
//! later shows:  on_before_show -> [insert] -> on_show
//! ```
//!
//! `on_show` is skipped if another screen became the show target before the
//! show sequence ran (possible while a transition is animating).
//!
//! [`ViewLoader`]: crate::domain::ports::ViewLoader

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::domain::entities::{AppInfo, ViewHandle};
use crate::domain::errors::ScreenError;
use crate::domain::navigation::{NavigationState, ScreenRequest};
use crate::domain::ports::ScreenTransition;
use crate::domain::ScreenName;

/// Lifecycle hooks of a screen controller. Every hook defaults to a no-op.
pub trait ScreenController {
    /// Receives the back-reference to the manager. Called exactly once,
    /// before [`prepare`](Self::prepare).
    fn attach(&mut self, _context: ScreenContext) {}

    /// Called once after the view was loaded and the context attached.
    ///
    /// # Errors
    /// An error aborts registration of the screen.
    fn prepare(&mut self) -> Result<(), ScreenError> {
        Ok(())
    }

    /// Called before the screen is inserted for the first time.
    fn on_before_first_show(&mut self) {}

    /// Called before every insertion, after any transition has been set up.
    fn on_before_show(&mut self) {}

    /// Called once after the first insertion or transition completed.
    fn on_first_show(&mut self) {}

    /// Called after every insertion or completed transition, as long as the
    /// screen is still the current one.
    fn on_show(&mut self) {}
}

/// Non-owning view of the screen manager handed to controllers.
///
/// Queries made after the manager was dropped report no screens and no
/// active close request.
#[derive(Clone)]
pub struct ScreenContext {
    name: ScreenName,
    view: ViewHandle,
    application: Rc<AppInfo>,
    navigation: Weak<RefCell<NavigationState>>,
    close_request: watch::Receiver<bool>,
    requests: mpsc::UnboundedSender<ScreenRequest>,
}

impl ScreenContext {
    #[must_use]
    pub fn new(
        name: ScreenName,
        view: ViewHandle,
        application: Rc<AppInfo>,
        navigation: Weak<RefCell<NavigationState>>,
        close_request: watch::Receiver<bool>,
        requests: mpsc::UnboundedSender<ScreenRequest>,
    ) -> Self {
        Self {
            name,
            view,
            application,
            navigation,
            close_request,
            requests,
        }
    }

    /// Name the controller was registered under.
    #[must_use]
    pub const fn name(&self) -> &ScreenName {
        &self.name
    }

    #[must_use]
    pub const fn view(&self) -> &ViewHandle {
        &self.view
    }

    #[must_use]
    pub fn application(&self) -> &AppInfo {
        &self.application
    }

    /// Returns whether the owning manager is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.navigation.strong_count() > 0
    }

    #[must_use]
    pub fn current_screen_name(&self) -> Option<ScreenName> {
        self.with_navigation(|nav| nav.current().cloned())
            .flatten()
    }

    #[must_use]
    pub fn previous_screen_name(&self) -> Option<ScreenName> {
        self.with_navigation(|nav| nav.previous().cloned())
            .flatten()
    }

    #[must_use]
    pub fn current_screen_name_matches(&self, name: &str) -> bool {
        self.with_navigation(|nav| nav.current_matches(name))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn previous_screen_name_matches(&self, name: &str) -> bool {
        self.with_navigation(|nav| nav.previous_matches(name))
            .unwrap_or(false)
    }

    /// Returns whether this controller's screen is the current one.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current_screen_name_matches(self.name.as_str())
    }

    #[must_use]
    pub fn is_close_request_active(&self) -> bool {
        self.is_attached() && *self.close_request.borrow()
    }

    /// Receiver for observing the close request flag.
    #[must_use]
    pub fn close_request(&self) -> watch::Receiver<bool> {
        self.close_request.clone()
    }

    /// Queues a show request. Returns `false` if the manager is gone.
    pub fn request_show(&self, name: impl Into<ScreenName>) -> bool {
        self.send(ScreenRequest::Show(name.into()))
    }

    /// Queues an animated show request. Returns `false` if the manager is gone.
    pub fn request_show_with(
        &self,
        name: impl Into<ScreenName>,
        transition: Box<dyn ScreenTransition>,
    ) -> bool {
        self.send(ScreenRequest::ShowWith(name.into(), transition))
    }

    /// Queues an arbitrary request. Returns `false` if the manager is gone.
    pub fn send(&self, request: ScreenRequest) -> bool {
        if !self.is_attached() {
            debug!(screen = %self.name, ?request, "Dropping request, manager is gone");
            return false;
        }
        self.requests.send(request).is_ok()
    }

    fn with_navigation<T>(&self, f: impl FnOnce(&NavigationState) -> T) -> Option<T> {
        self.navigation.upgrade().map(|nav| f(&nav.borrow()))
    }
}
