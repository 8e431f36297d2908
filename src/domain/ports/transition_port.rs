//! Screen transition port definition.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ScreenName;
use crate::domain::entities::{DisplayedScreen, Host};

/// Progress reported by a transition on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    Running,
    Finished,
}

/// Message posted when a transition finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCompleted {
    pub ticket: u64,
    pub target: ScreenName,
}

/// One-shot completion handle given to a transition.
///
/// Consuming it posts a [`TransitionCompleted`] to the manager, which runs
/// the target's show hooks the next time it drains completions.
#[derive(Debug)]
pub struct TransitionDone {
    completion: TransitionCompleted,
    tx: mpsc::UnboundedSender<TransitionCompleted>,
}

impl TransitionDone {
    #[must_use]
    pub fn new(
        ticket: u64,
        target: ScreenName,
        tx: mpsc::UnboundedSender<TransitionCompleted>,
    ) -> Self {
        Self {
            completion: TransitionCompleted { ticket, target },
            tx,
        }
    }

    #[must_use]
    pub const fn target(&self) -> &ScreenName {
        &self.completion.target
    }

    pub fn complete(self) {
        if self.tx.send(self.completion).is_err() {
            debug!("Transition completed after its manager was dropped");
        }
    }
}

/// Port for visual transitions between two screens.
///
/// The engine owns placement during the animation: it must end with the
/// incoming screen in slot 0 of the host and the outgoing one removed, then
/// consume `done`.
pub trait ScreenTransition {
    /// Starts the transition. `outgoing` is `None` when nothing is displayed.
    fn animate(
        &mut self,
        host: &mut Host,
        outgoing: Option<DisplayedScreen>,
        incoming: DisplayedScreen,
        done: TransitionDone,
    );

    /// Advances the animation by `elapsed`.
    fn tick(&mut self, host: &mut Host, elapsed: Duration) -> TransitionStatus;
}
