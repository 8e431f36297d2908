use std::time::Duration;

use tachyonfx::Interpolation;

use crate::domain::entities::{DisplayedScreen, Host, Transform};
use crate::domain::ports::{ScreenTransition, TransitionDone, TransitionStatus};

use super::{DEFAULT_TRANSITION_DURATION, Staged, Timeline};

/// Cross-fade: the incoming screen fades in while the outgoing one fades out.
#[derive(Debug)]
pub struct FadeTransition {
    timeline: Timeline,
    staged: Option<Staged>,
}

impl FadeTransition {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self::with_interpolation(duration, Interpolation::QuadInOut)
    }

    #[must_use]
    pub const fn with_interpolation(duration: Duration, interpolation: Interpolation) -> Self {
        Self {
            timeline: Timeline::new(duration, interpolation),
            staged: None,
        }
    }

    fn apply(&self) {
        let Some(staged) = &self.staged else {
            return;
        };
        let alpha = self.timeline.alpha();
        staged.incoming.view.update_transform(|t| t.opacity = alpha);
        if let Some(outgoing) = &staged.outgoing {
            outgoing.view.update_transform(|t| t.opacity = 1.0 - alpha);
        }
    }
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DURATION)
    }
}

impl ScreenTransition for FadeTransition {
    fn animate(
        &mut self,
        host: &mut Host,
        outgoing: Option<DisplayedScreen>,
        incoming: DisplayedScreen,
        done: TransitionDone,
    ) {
        let initial = Transform {
            opacity: 0.0,
            ..Transform::IDENTITY
        };
        self.staged = Some(Staged::begin(host, outgoing, incoming, done, initial));
    }

    fn tick(&mut self, host: &mut Host, elapsed: Duration) -> TransitionStatus {
        if self.staged.is_none() {
            return TransitionStatus::Finished;
        }
        self.timeline.advance(elapsed);
        if !self.timeline.is_done() {
            self.apply();
            return TransitionStatus::Running;
        }
        if let Some(staged) = self.staged.take() {
            staged.finish(host);
        }
        TransitionStatus::Finished
    }
}
