//! Main application orchestrator.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::{DefaultTerminal, Frame};
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::services::ScreenManager;
use crate::domain::ports::ScreenTransition;
use crate::infrastructure::config::{TransitionKind, UiConfig};
use crate::infrastructure::transitions::{FadeTransition, SlideDirection, SlideTransition};
use crate::presentation::events::{EventHandler, EventResult, ShellCommand};
use crate::presentation::widgets::{FooterBar, HostView, SHELL_HINTS};

const FOOTER_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

pub struct App {
    state: AppState,
    manager: ScreenManager,
    animations: bool,
    transition: TransitionKind,
    transition_duration: Duration,
    frame_interval: Duration,
}

impl App {
    #[must_use]
    pub fn new(manager: ScreenManager, ui: &UiConfig) -> Self {
        Self {
            state: AppState::Running,
            manager,
            animations: ui.enable_animations,
            transition: ui.transition,
            transition_duration: ui.transition_duration(),
            frame_interval: ui.frame_interval(),
        }
    }

    #[must_use]
    pub const fn manager(&self) -> &ScreenManager {
        &self.manager
    }

    #[must_use]
    pub const fn animations_enabled(&self) -> bool {
        self.animations
    }

    /// # Errors
    /// Returns error if drawing to the terminal or reading events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        self.run_event_loop(terminal).await?;

        info!(
            close_requested = self.manager.is_close_request_active(),
            "Application exiting normally"
        );
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(self.frame_interval);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                _ = animation_interval.tick() => {
                    let busy = self.manager.has_transition_in_flight();
                    let completed = self.manager.tick(self.frame_interval);
                    let requests = self.manager.process_requests();
                    if busy || completed > 0 || requests > 0 {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(event) = terminal_event => {
                    if self.handle_terminal_event(event?) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                    self.manager.process_requests();
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                self.resize(width, height);
                EventResult::Consumed
            }
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        let Some(command) = EventHandler::command_for(&key) else {
            return EventResult::Continue;
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Quit => {
                self.manager.on_close_requested();
                return EventResult::Exit;
            }
            ShellCommand::ShowIndex(index) => {
                if let Some(name) = self.manager.screen_names().get(index).cloned() {
                    self.show(name.as_str());
                }
            }
            ShellCommand::NextScreen => self.cycle(true),
            ShellCommand::PreviousScreen => self.cycle(false),
            ShellCommand::Back => {
                if let Some(previous) = self.manager.previous_screen_name() {
                    self.show(previous.as_str());
                }
            }
            ShellCommand::ToggleLoading => {
                if self.manager.is_loading_indicator_visible() {
                    self.manager.hide_loading_indicator_overlay();
                } else {
                    self.manager.show_loading_indicator_overlay();
                }
            }
            ShellCommand::ToggleShade => {
                if self.manager.is_shaded() {
                    self.manager.unshade_screen();
                } else {
                    self.manager.shade_screen();
                }
            }
            ShellCommand::ToggleAnimations => {
                self.animations = !self.animations;
                info!(enabled = self.animations, "Animations toggled");
            }
        }
        EventResult::Consumed
    }

    fn cycle(&mut self, forward: bool) {
        let names = self.manager.screen_names();
        let len = names.len();
        if len == 0 {
            return;
        }
        let current = self
            .manager
            .current_screen_name()
            .and_then(|current| names.iter().position(|name| *name == current));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        };
        let name = names[next].clone();
        self.show(name.as_str());
    }

    fn show(&mut self, name: &str) {
        if self.manager.has_transition_in_flight() {
            debug!(screen = name, "Ignoring navigation while a transition is running");
            return;
        }
        match self.make_transition() {
            Some(transition) => {
                self.manager.show_screen_with(name, transition);
            }
            None => {
                self.manager.show_screen(name);
            }
        }
    }

    fn make_transition(&self) -> Option<Box<dyn ScreenTransition>> {
        if !self.animations {
            return None;
        }
        match self.transition {
            TransitionKind::Fade => Some(Box::new(FadeTransition::new(self.transition_duration))),
            TransitionKind::Slide => Some(Box::new(SlideTransition::new(
                SlideDirection::Right,
                self.transition_duration,
            ))),
            TransitionKind::None => None,
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let [host_area, _] = Self::split(Rect::new(0, 0, width, height));
        self.manager.resize_host(host_area.width, host_area.height);
    }

    fn split(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(area)
    }

    fn status_line(&self) -> String {
        let current = self
            .manager
            .current_screen_name()
            .map_or_else(|| "-".to_string(), |name| name.to_string());
        let animation = if self.animations {
            format!("{:?}", self.transition).to_lowercase()
        } else {
            "off".to_string()
        };
        format!(
            " {current} | skin {} | anim {animation} ",
            self.manager.skin()
        )
    }

    fn render(&self, frame: &mut Frame) {
        let [host_area, footer_area] = Self::split(frame.area());
        frame.render_widget(HostView::new(self.manager.host()), host_area);

        let status = self.status_line();
        frame.render_widget(
            FooterBar::new(SHELL_HINTS).right_info(Some(status.as_str())),
            footer_area,
        );
    }
}
