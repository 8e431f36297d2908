//! Screen registry and show/transition state machine.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::domain::entities::{
    AppInfo, DisplayedScreen, Host, HostEffect, HostSize, Overlay, OverlayKind, SHADE_BLUR_RADIUS,
    View, ViewHandle, ViewResource,
};
use crate::domain::ports::{
    LoadedView, ScreenTransition, TransitionCompleted, TransitionDone, TransitionStatus,
    ViewBundle, ViewLoader,
};
use crate::domain::{
    NavigationState, ScreenContext, ScreenController, ScreenError, ScreenName, ScreenRequest,
};

/// Skin used until another one is selected.
pub const DEFAULT_SKIN: &str = "default";

/// A registered view and the controller that drives it.
pub struct ScreenInstance {
    view: ViewHandle,
    controller: Box<dyn ScreenController>,
}

impl ScreenInstance {
    #[must_use]
    pub const fn view(&self) -> &ViewHandle {
        &self.view
    }

    #[must_use]
    pub fn controller(&self) -> &dyn ScreenController {
        self.controller.as_ref()
    }
}

/// Outcome of a bulk discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub registered: Vec<ScreenName>,
    pub failed: Vec<ScreenName>,
}

/// Owns every screen and decides what the host displays.
///
/// All state lives on the UI thread. The only deferred work is the show
/// sequence of an animated show, which runs when [`tick`](Self::tick) or
/// [`process_transition_completions`](Self::process_transition_completions)
/// drains the completion posted by the transition.
pub struct ScreenManager {
    application: Rc<AppInfo>,
    loader: Box<dyn ViewLoader>,
    skin: String,
    screens: HashMap<ScreenName, ScreenInstance>,
    order: Vec<ScreenName>,
    navigation: Rc<RefCell<NavigationState>>,
    shown: HashSet<ScreenName>,
    host: Host,
    loading_overlay: Option<Overlay>,
    shade_overlay: Option<Overlay>,
    close_request: watch::Sender<bool>,
    request_tx: mpsc::UnboundedSender<ScreenRequest>,
    request_rx: mpsc::UnboundedReceiver<ScreenRequest>,
    pending_requests: VecDeque<ScreenRequest>,
    completion_tx: mpsc::UnboundedSender<TransitionCompleted>,
    completion_rx: mpsc::UnboundedReceiver<TransitionCompleted>,
    transitions: Vec<Box<dyn ScreenTransition>>,
    next_ticket: u64,
}

impl ScreenManager {
    #[must_use]
    pub fn new(application: AppInfo, loader: Box<dyn ViewLoader>) -> Self {
        let (close_request, _) = watch::channel(false);
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            application: Rc::new(application),
            loader,
            skin: DEFAULT_SKIN.to_string(),
            screens: HashMap::new(),
            order: Vec::new(),
            navigation: Rc::new(RefCell::new(NavigationState::new())),
            shown: HashSet::new(),
            host: Host::default(),
            loading_overlay: None,
            shade_overlay: None,
            close_request,
            request_tx,
            request_rx,
            pending_requests: VecDeque::new(),
            completion_tx,
            completion_rx,
            transitions: Vec::new(),
            next_ticket: 0,
        }
    }

    // ---- registration ----

    /// Discovers every view in `bundle` and registers it.
    ///
    /// A view that fails to load or prepare is logged and skipped; the other
    /// screens still register.
    pub fn init_screens(&mut self, bundle: &dyn ViewBundle) -> InitReport {
        let mut report = InitReport::default();

        let views = match bundle.discover_views() {
            Ok(views) => views,
            Err(e) => {
                warn!(bundle = %bundle.location(), error = %e, "View discovery failed");
                return report;
            }
        };

        for (name, resource) in views {
            match self.register_screen(name.clone(), &resource) {
                Ok(()) => report.registered.push(name),
                Err(e) => {
                    warn!(screen = %name, error = %e, "Skipping screen");
                    report.failed.push(name);
                }
            }
        }

        info!(
            registered = report.registered.len(),
            failed = report.failed.len(),
            "Screens initialized"
        );
        report
    }

    /// Loads `resource` and registers it under `name`, replacing any screen
    /// already registered with that name.
    ///
    /// # Errors
    /// Returns `ScreenError::Load` if loading or `prepare` fails. The registry
    /// is left untouched in that case.
    pub fn register_screen(
        &mut self,
        name: impl Into<ScreenName>,
        resource: &ViewResource,
    ) -> Result<(), ScreenError> {
        let loaded = self.loader.load(resource)?;
        self.register_loaded(name, loaded).map_err(|e| match e {
            ScreenError::Load { message, .. } => ScreenError::load(resource.location(), message),
            other => ScreenError::load(resource.location(), other.to_string()),
        })
    }

    /// Registers an already built view/controller pair.
    ///
    /// # Errors
    /// Returns the error of the controller's `prepare`.
    pub fn register_loaded(
        &mut self,
        name: impl Into<ScreenName>,
        loaded: LoadedView,
    ) -> Result<(), ScreenError> {
        let name = name.into();
        let LoadedView {
            view,
            mut controller,
        } = loaded;
        let view = ViewHandle::new(view);

        controller.attach(self.context_for(&name, &view));
        controller.prepare()?;

        let replaced = self
            .screens
            .insert(name.clone(), ScreenInstance { view, controller })
            .is_some();

        if replaced {
            debug!(screen = %name, "Replaced registered screen");
        } else {
            self.order.push(name.clone());
            debug!(screen = %name, "Registered screen");
        }
        Ok(())
    }

    /// Removes a screen. Returns whether it was registered.
    ///
    /// Navigation state is not touched; if the screen is displayed it stays
    /// in the host until another screen replaces it.
    pub fn remove_screen(&mut self, name: &str) -> bool {
        let name = ScreenName::new(name);
        let removed = self.screens.remove(&name).is_some();
        if removed {
            self.order.retain(|n| n != &name);
            debug!(screen = %name, "Removed screen");
        }
        removed
    }

    /// Looks up the view of a registered screen.
    ///
    /// # Errors
    /// Returns `ScreenError::NotFound` for unknown names.
    pub fn screen(&self, name: &str) -> Result<&ViewHandle, ScreenError> {
        self.instance(&ScreenName::new(name)).map(ScreenInstance::view)
    }

    /// Looks up the controller of a registered screen.
    ///
    /// # Errors
    /// Returns `ScreenError::NotFound` for unknown names.
    pub fn controller(&self, name: &str) -> Result<&dyn ScreenController, ScreenError> {
        self.instance(&ScreenName::new(name))
            .map(ScreenInstance::controller)
    }

    /// # Errors
    /// Returns `ScreenError::NotFound` for unknown names.
    pub fn controller_mut(&mut self, name: &str) -> Result<&mut dyn ScreenController, ScreenError> {
        let name = ScreenName::new(name);
        match self.screens.get_mut(&name) {
            Some(instance) => Ok(instance.controller.as_mut()),
            None => Err(ScreenError::not_found(name)),
        }
    }

    #[must_use]
    pub fn contains_screen(&self, name: &str) -> bool {
        self.screens.contains_key(&ScreenName::new(name))
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn screen_names(&self) -> &[ScreenName] {
        &self.order
    }

    // ---- stylesheets ----

    /// Appends a stylesheet reference to a screen's view.
    pub fn add_stylesheet_to_screen(&mut self, name: &str, path: &str) -> bool {
        match self.screen(name) {
            Ok(view) => {
                view.borrow_mut().stylesheets.push(path.to_string());
                info!(screen = name, path, "Added stylesheet");
                true
            }
            Err(e) => {
                warn!(error = %e, path, "Cannot add stylesheet");
                false
            }
        }
    }

    /// Attaches `skin/<skin>/css/<screen>.css` of the current skin to every
    /// screen that has one.
    pub fn init_stylesheets(&mut self, bundle: &dyn ViewBundle) -> usize {
        let skin = self.skin.clone();
        self.init_stylesheets_with_skin(bundle, &skin)
    }

    /// Like [`init_stylesheets`](Self::init_stylesheets) with an explicit skin.
    /// Returns the number of stylesheets attached.
    pub fn init_stylesheets_with_skin(&mut self, bundle: &dyn ViewBundle, skin: &str) -> usize {
        let mut attached = 0;
        for name in self.order.clone() {
            let path = format!("skin/{skin}/css/{name}.css");
            let Some(resource) = bundle.resolve(&path) else {
                debug!(screen = %name, path, "No stylesheet for screen");
                continue;
            };
            if self.add_stylesheet_to_screen(name.as_str(), &resource.location()) {
                attached += 1;
            }
        }
        attached
    }

    #[must_use]
    pub fn skin(&self) -> &str {
        &self.skin
    }

    pub fn set_skin(&mut self, skin: impl Into<String>) {
        self.skin = skin.into();
    }

    // ---- show protocol ----

    /// Shows a screen immediately. Returns `false` if it is not registered.
    pub fn show_screen(&mut self, name: &str) -> bool {
        match self.try_show_screen(name) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cannot show screen");
                false
            }
        }
    }

    /// # Errors
    /// Returns `ScreenError::NotFound` if the screen is not registered; no
    /// state is changed in that case.
    pub fn try_show_screen(&mut self, name: &str) -> Result<(), ScreenError> {
        let incoming = self.begin_show(name)?;
        self.host.remove_displayed_screen();
        self.run_before_show(&incoming.name);
        let name = incoming.name.clone();
        self.host.insert_screen(incoming);
        self.run_show(&name);
        Ok(())
    }

    /// Shows a screen through `transition`. The before-show hooks run right
    /// away, the show hooks once the transition has completed.
    ///
    /// Transitions are neither queued nor cancelled: starting one while
    /// another is running lets both play out. Callers wait for
    /// [`has_transition_in_flight`](Self::has_transition_in_flight) to turn
    /// false before showing another screen.
    pub fn show_screen_with(&mut self, name: &str, transition: Box<dyn ScreenTransition>) -> bool {
        match self.try_show_screen_with(name, transition) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cannot show screen");
                false
            }
        }
    }

    /// # Errors
    /// Returns `ScreenError::NotFound` if the screen is not registered.
    pub fn try_show_screen_with(
        &mut self,
        name: &str,
        mut transition: Box<dyn ScreenTransition>,
    ) -> Result<(), ScreenError> {
        let incoming = self.begin_show(name)?;
        self.run_before_show(&incoming.name);

        if !self.transitions.is_empty() {
            warn!(
                screen = %incoming.name,
                running = self.transitions.len(),
                "Starting a transition while another one is running"
            );
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let done = TransitionDone::new(ticket, incoming.name.clone(), self.completion_tx.clone());
        let outgoing = self.host.displayed_screen();

        debug!(screen = %incoming.name, ticket, has_outgoing = outgoing.is_some(), "Starting transition");
        transition.animate(&mut self.host, outgoing, incoming, done);
        self.transitions.push(transition);
        Ok(())
    }

    /// Advances running transitions and runs the show hooks of those that
    /// completed. Returns the number of completions handled.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let host = &mut self.host;
        self.transitions
            .retain_mut(|transition| transition.tick(host, elapsed) == TransitionStatus::Running);
        self.process_transition_completions()
    }

    /// Runs the show hooks for every completion posted so far.
    pub fn process_transition_completions(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(completed) = self.completion_rx.try_recv() {
            debug!(screen = %completed.target, ticket = completed.ticket, "Transition completed");
            self.run_show(&completed.target);
            handled += 1;
        }
        handled
    }

    #[must_use]
    pub fn has_transition_in_flight(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Performs the requests queued by controllers, in order. Returns how
    /// many ran.
    ///
    /// A show request waits while a transition is in flight, and so does
    /// everything queued after it.
    pub fn process_requests(&mut self) -> usize {
        let mut handled = 0;
        loop {
            while let Ok(request) = self.request_rx.try_recv() {
                self.pending_requests.push_back(request);
            }
            let Some(request) = self.pending_requests.pop_front() else {
                break;
            };
            if request.is_show() && self.has_transition_in_flight() {
                debug!(?request, waiting = self.pending_requests.len(), "Deferring show request");
                self.pending_requests.push_front(request);
                break;
            }
            debug!(?request, "Processing screen request");
            match request {
                ScreenRequest::Show(name) => {
                    self.show_screen(name.as_str());
                }
                ScreenRequest::ShowWith(name, transition) => {
                    self.show_screen_with(name.as_str(), transition);
                }
                ScreenRequest::ShowLoadingIndicator => self.show_loading_indicator_overlay(),
                ScreenRequest::HideLoadingIndicator => self.hide_loading_indicator_overlay(),
                ScreenRequest::Shade => self.shade_screen(),
                ScreenRequest::Unshade => self.unshade_screen(),
            }
            handled += 1;
        }
        handled
    }

    /// Returns whether requests are waiting for a transition to finish.
    #[must_use]
    pub fn has_pending_requests(&self) -> bool {
        !self.pending_requests.is_empty()
    }

    fn begin_show(&mut self, name: &str) -> Result<DisplayedScreen, ScreenError> {
        let name = ScreenName::new(name);
        let view = self.instance(&name)?.view.clone();

        self.navigation.borrow_mut().advance(name.clone());
        view.borrow_mut().reset_transform();

        Ok(DisplayedScreen { name, view })
    }

    fn run_before_show(&mut self, name: &ScreenName) {
        let first = !self.shown.contains(name);
        let Some(instance) = self.screens.get_mut(name) else {
            return;
        };

        if first {
            debug!(screen = %name, "on_before_first_show");
            instance.controller.on_before_first_show();
        }
        debug!(screen = %name, "on_before_show");
        instance.controller.on_before_show();
    }

    fn run_show(&mut self, name: &ScreenName) {
        let Some(instance) = self.screens.get_mut(name) else {
            debug!(screen = %name, "Screen removed before its show hooks ran");
            return;
        };

        if !self.shown.contains(name) {
            debug!(screen = %name, "on_first_show");
            instance.controller.on_first_show();
            self.shown.insert(name.clone());
        }

        let is_current = self.navigation.borrow().current() == Some(name);
        if is_current {
            debug!(screen = %name, "on_show");
            instance.controller.on_show();
        } else {
            debug!(screen = %name, "Skipping on_show, screen is no longer current");
        }
    }

    // ---- overlays ----

    pub fn show_loading_indicator_overlay(&mut self) {
        let size = self.host.size();
        let overlay = self
            .loading_overlay
            .get_or_insert_with(|| {
                debug!("Creating loading indicator overlay");
                Overlay::loading_indicator(size)
            })
            .clone();
        self.host.add_overlay(overlay);
    }

    pub fn hide_loading_indicator_overlay(&mut self) {
        if self.loading_overlay.is_some() {
            self.host.remove_overlay(OverlayKind::LoadingIndicator);
        }
    }

    #[must_use]
    pub fn is_loading_indicator_visible(&self) -> bool {
        self.host.has_overlay(OverlayKind::LoadingIndicator)
    }

    /// Blurs the host and covers it with a translucent scrim.
    pub fn shade_screen(&mut self) {
        let size = self.host.size();
        let overlay = self
            .shade_overlay
            .get_or_insert_with(|| Overlay::shade_scrim(size))
            .clone();
        self.host.set_effect(Some(HostEffect::Blur {
            radius: SHADE_BLUR_RADIUS,
        }));
        self.host.add_overlay(overlay);
    }

    pub fn unshade_screen(&mut self) {
        self.host.set_effect(None);
        self.host.remove_overlay(OverlayKind::Shade);
    }

    #[must_use]
    pub fn is_shaded(&self) -> bool {
        self.host.effect().is_some() || self.host.has_overlay(OverlayKind::Shade)
    }

    // ---- queries ----

    #[must_use]
    pub fn current_screen_name(&self) -> Option<ScreenName> {
        self.navigation.borrow().current().cloned()
    }

    #[must_use]
    pub fn previous_screen_name(&self) -> Option<ScreenName> {
        self.navigation.borrow().previous().cloned()
    }

    #[must_use]
    pub fn current_screen_name_matches(&self, name: &str) -> bool {
        self.navigation.borrow().current_matches(name)
    }

    #[must_use]
    pub fn previous_screen_name_matches(&self, name: &str) -> bool {
        self.navigation.borrow().previous_matches(name)
    }

    /// Returns whether the screen completed at least one show cycle.
    #[must_use]
    pub fn has_been_shown(&self, name: &str) -> bool {
        self.shown.contains(&ScreenName::new(name))
    }

    #[must_use]
    pub const fn shown_screens(&self) -> &HashSet<ScreenName> {
        &self.shown
    }

    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    pub fn resize_host(&mut self, width: u16, height: u16) {
        self.host.resize(HostSize::new(width, height));
    }

    #[must_use]
    pub fn application(&self) -> &AppInfo {
        &self.application
    }

    // ---- close request ----

    #[must_use]
    pub fn is_close_request_active(&self) -> bool {
        *self.close_request.borrow()
    }

    /// Receiver for observing the close request flag.
    #[must_use]
    pub fn close_request_receiver(&self) -> watch::Receiver<bool> {
        self.close_request.subscribe()
    }

    /// Marks an application close request as in progress.
    pub fn on_close_requested(&mut self) {
        info!("Close requested");
        self.close_request.send_replace(true);
    }

    pub fn clear_close_request(&mut self) {
        self.close_request.send_replace(false);
    }

    fn instance(&self, name: &ScreenName) -> Result<&ScreenInstance, ScreenError> {
        self.screens
            .get(name)
            .ok_or_else(|| ScreenError::not_found(name.clone()))
    }

    fn context_for(&self, name: &ScreenName, view: &ViewHandle) -> ScreenContext {
        ScreenContext::new(
            name.clone(),
            view.clone(),
            Rc::clone(&self.application),
            Rc::downgrade(&self.navigation),
            self.close_request.subscribe(),
            self.request_tx.clone(),
        )
    }
}

impl std::fmt::Debug for ScreenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenManager")
            .field("screens", &self.order)
            .field("navigation", &self.navigation.borrow())
            .field("shown", &self.shown)
            .field("transitions", &self.transitions.len())
            .finish_non_exhaustive()
    }
}

/// Builds a [`LoadedView`] from a plain view and controller.
#[must_use]
pub fn loaded(view: View, controller: impl ScreenController + 'static) -> LoadedView {
    LoadedView::new(view, Box::new(controller))
}
