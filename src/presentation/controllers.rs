//! Controllers available to view definitions of the demo shell.

use tracing::{debug, info};

use crate::domain::errors::ScreenError;
use crate::domain::{ScreenContext, ScreenController, ScreenRequest};
use crate::infrastructure::views::ControllerRegistry;

/// Controller kind of [`TraceController`].
pub const TRACE_CONTROLLER: &str = "trace";

/// Controller kind of [`BusyController`].
pub const BUSY_CONTROLLER: &str = "busy";

/// Logs every lifecycle hook and keeps a status line in its view.
#[derive(Default)]
pub struct TraceController {
    context: Option<ScreenContext>,
    shows: usize,
    base_body: Vec<String>,
}

impl TraceController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn shows(&self) -> usize {
        self.shows
    }

    fn screen(&self) -> &str {
        self.context.as_ref().map_or("?", |ctx| ctx.name().as_str())
    }

    fn refresh_status(&self) {
        let Some(ctx) = &self.context else {
            return;
        };
        let previous = ctx
            .previous_screen_name()
            .map_or_else(|| "-".to_string(), |name| name.to_string());
        let mut view = ctx.view().borrow_mut();
        view.body.clone_from(&self.base_body);
        view.body.push(String::new());
        view.body.push(format!("shown {} time(s), came from {previous}", self.shows));
    }
}

impl ScreenController for TraceController {
    fn attach(&mut self, context: ScreenContext) {
        self.base_body = context.view().borrow().body.clone();
        self.context = Some(context);
    }

    fn prepare(&mut self) -> Result<(), ScreenError> {
        debug!(screen = self.screen(), "prepare");
        Ok(())
    }

    fn on_before_first_show(&mut self) {
        debug!(screen = self.screen(), "on_before_first_show");
    }

    fn on_before_show(&mut self) {
        debug!(screen = self.screen(), "on_before_show");
    }

    fn on_first_show(&mut self) {
        debug!(screen = self.screen(), "on_first_show");
    }

    fn on_show(&mut self) {
        self.shows += 1;
        info!(screen = self.screen(), shows = self.shows, "Screen shown");
        self.refresh_status();
    }
}

/// Shows the loading indicator while it is being shown for the first time
/// and hides it once it is on screen.
#[derive(Default)]
pub struct BusyController {
    context: Option<ScreenContext>,
}

impl ScreenController for BusyController {
    fn attach(&mut self, context: ScreenContext) {
        self.context = Some(context);
    }

    fn on_before_first_show(&mut self) {
        if let Some(ctx) = &self.context {
            ctx.send(ScreenRequest::ShowLoadingIndicator);
        }
    }

    fn on_first_show(&mut self) {
        if let Some(ctx) = &self.context {
            ctx.send(ScreenRequest::HideLoadingIndicator);
        }
    }
}

/// Registry with the plain controller and every demo controller.
#[must_use]
pub fn demo_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .register(TRACE_CONTROLLER, || Box::new(TraceController::new()))
        .register(BUSY_CONTROLLER, || Box::new(BusyController::default()));
    registry
}
