//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Shell command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Request application close.
    Quit,
    /// Show the n-th registered screen, zero based.
    ShowIndex(usize),
    /// Show the screen registered after the current one.
    NextScreen,
    /// Show the screen registered before the current one.
    PreviousScreen,
    /// Show the previously shown screen.
    Back,
    /// Show or hide the loading indicator overlay.
    ToggleLoading,
    /// Shade or unshade the host.
    ToggleShade,
    /// Switch animated transitions on or off.
    ToggleAnimations,
}

/// Terminal key mapping.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } | KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Maps a key press to a shell command. Releases and repeats are ignored.
    #[must_use]
    pub fn command_for(key: &KeyEvent) -> Option<ShellCommand> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if Self::is_quit_event(key) {
            return Some(ShellCommand::Quit);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|digit| usize::try_from(digit).ok())
                .map(|digit| ShellCommand::ShowIndex(digit - 1)),
            KeyCode::Tab | KeyCode::Right => Some(ShellCommand::NextScreen),
            KeyCode::BackTab | KeyCode::Left => Some(ShellCommand::PreviousScreen),
            KeyCode::Backspace | KeyCode::Char('b') => Some(ShellCommand::Back),
            KeyCode::Char('l') => Some(ShellCommand::ToggleLoading),
            KeyCode::Char('s') => Some(ShellCommand::ToggleShade),
            KeyCode::Char('a') => Some(ShellCommand::ToggleAnimations),
            _ => None,
        }
    }
}
