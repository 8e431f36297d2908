use std::time::Duration;

use tachyonfx::Interpolation;

use crate::domain::entities::{DisplayedScreen, Host, HostSize, Transform};
use crate::domain::ports::{ScreenTransition, TransitionDone, TransitionStatus};

use super::{DEFAULT_TRANSITION_DURATION, Staged, Timeline};

/// Edge the incoming screen enters from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl SlideDirection {
    /// Start offset of the incoming screen, in cells.
    fn entry_offset(self, size: HostSize) -> (f32, f32) {
        let width = f32::from(size.width);
        let height = f32::from(size.height);
        match self {
            Self::Left => (-width, 0.0),
            Self::Right => (width, 0.0),
            Self::Top => (0.0, -height),
            Self::Bottom => (0.0, height),
        }
    }
}

/// Pushes the outgoing screen out while the incoming one slides in.
#[derive(Debug)]
pub struct SlideTransition {
    direction: SlideDirection,
    timeline: Timeline,
    offset: (f32, f32),
    staged: Option<Staged>,
}

impl SlideTransition {
    #[must_use]
    pub const fn new(direction: SlideDirection, duration: Duration) -> Self {
        Self {
            direction,
            timeline: Timeline::new(duration, Interpolation::CubicOut),
            offset: (0.0, 0.0),
            staged: None,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> SlideDirection {
        self.direction
    }

    fn apply(&self) {
        let Some(staged) = &self.staged else {
            return;
        };
        let remaining = 1.0 - self.timeline.alpha();
        let (dx, dy) = self.offset;
        staged.incoming.view.update_transform(|t| {
            t.translate_x = dx * remaining;
            t.translate_y = dy * remaining;
        });
        if let Some(outgoing) = &staged.outgoing {
            let travelled = 1.0 - remaining;
            outgoing.view.update_transform(|t| {
                t.translate_x = -dx * travelled;
                t.translate_y = -dy * travelled;
            });
        }
    }
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self::new(SlideDirection::default(), DEFAULT_TRANSITION_DURATION)
    }
}

impl ScreenTransition for SlideTransition {
    fn animate(
        &mut self,
        host: &mut Host,
        outgoing: Option<DisplayedScreen>,
        incoming: DisplayedScreen,
        done: TransitionDone,
    ) {
        self.offset = self.direction.entry_offset(host.size());
        let initial = Transform {
            translate_x: self.offset.0,
            translate_y: self.offset.1,
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
