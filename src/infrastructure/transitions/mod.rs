//! Screen transition engines.

mod fade;
mod slide;

use std::time::Duration;

use tachyonfx::Interpolation;

pub use fade::FadeTransition;
pub use slide::{SlideDirection, SlideTransition};

use crate::domain::entities::{DisplayedScreen, Host, Transform};
use crate::domain::ports::TransitionDone;

/// Default transition length.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Eased progress through a fixed duration.
#[derive(Debug, Clone)]
struct Timeline {
    duration: Duration,
    elapsed: Duration,
    interpolation: Interpolation,
}

impl Timeline {
    const fn new(duration: Duration, interpolation: Interpolation) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            interpolation,
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed).min(self.duration);
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in `0.0..=1.0`.
    fn alpha(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let linear = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.interpolation.alpha(linear.clamp(0.0, 1.0))
    }
}

/// Screens taking part in a running transition.
#[derive(Debug)]
struct Staged {
    /// `None` when nothing was displayed or the incoming screen was already
    /// the displayed one.
    outgoing: Option<DisplayedScreen>,
    incoming: DisplayedScreen,
    done: TransitionDone,
}

impl Staged {
    /// Places `incoming` above the displayed screen and applies `initial` to it.
    fn begin(
        host: &mut Host,
        outgoing: Option<DisplayedScreen>,
        incoming: DisplayedScreen,
        done: TransitionDone,
        initial: Transform,
    ) -> Self {
        let outgoing = outgoing.filter(|out| !out.view.ptr_eq(&incoming.view));
        if outgoing.is_some() {
            host.stage_screen(incoming.clone());
        } else {
            host.display_screen(incoming.clone());
        }
        incoming.view.set_transform(initial);
        Self {
            outgoing,
            incoming,
            done,
        }
    }

    /// Leaves `incoming` alone in slot 0 with both transforms restored, then
    /// signals completion.
    fn finish(self, host: &mut Host) {
        if let Some(outgoing) = &self.outgoing {
            host.remove_view(&outgoing.view);
            outgoing.view.set_transform(Transform::IDENTITY);
        }
        host.remove_view(&self.incoming.view);
        self.incoming.view.set_transform(Transform::IDENTITY);
        host.display_screen(self.incoming);
        self.done.complete();
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::mpsc;

    use crate::domain::ScreenName;
    use crate::domain::entities::{
        DisplayedScreen, Host, HostChild, HostSize, View, ViewHandle,
    };
    use crate::domain::ports::{TransitionCompleted, TransitionDone};

    pub fn screen(name: &str) -> DisplayedScreen {
        DisplayedScreen {
            name: ScreenName::new(name),
            view: ViewHandle::new(View::new(name)),
        }
    }

    pub fn done_for(
        target: &str,
    ) -> (TransitionDone, mpsc::UnboundedReceiver<TransitionCompleted>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TransitionDone::new(1, ScreenName::new(target), tx), rx)
    }

    pub fn host_with(displayed: Option<&DisplayedScreen>) -> Host {
        let mut host = Host::new(HostSize::new(80, 24));
        if let Some(screen) = displayed {
            host.display_screen(screen.clone());
        }
        host
    }

    pub fn screen_names(host: &Host) -> Vec<String> {
        host.children()
            .iter()
            .filter_map(|child| match child {
                HostChild::Screen { name, .. } => Some(name.to_string()),
                HostChild::Overlay(_) => None,
            })
            .collect()
    }
}
