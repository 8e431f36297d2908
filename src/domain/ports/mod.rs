mod transition_port;
mod view_bundle_port;
mod view_loader_port;

pub use transition_port::{
    ScreenTransition, TransitionCompleted, TransitionDone, TransitionStatus,
};
pub use view_bundle_port::ViewBundle;
pub use view_loader_port::{LoadedView, ViewLoader};

#[cfg(test)]
pub mod mocks {
    pub use super::transition_port::mock::SteppedTransition;
    pub use super::view_bundle_port::MockViewBundle;
    pub use super::view_loader_port::mock::MockViewLoader;
}
