//! View loading port definition.

use crate::domain::controller::ScreenController;
use crate::domain::entities::{View, ViewResource};
use crate::domain::errors::ScreenError;

/// A freshly loaded view paired with its controller.
pub struct LoadedView {
    pub view: View,
    pub controller: Box<dyn ScreenController>,
}

impl LoadedView {
    #[must_use]
    pub fn new(view: View, controller: Box<dyn ScreenController>) -> Self {
        Self { view, controller }
    }
}

/// Port turning a view resource into a (view, controller) pair.
pub trait ViewLoader {
    /// Loads the view definition behind `resource`.
    ///
    /// # Errors
    /// Returns `ScreenError::Load` if the definition cannot be read or built.
    fn load(&self, resource: &ViewResource) -> Result<LoadedView, ScreenError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::controller::mock::{HookLog, RecordingController};
    use std::collections::HashSet;

    /// Loader building recording controllers. Resources whose location is
    /// listed in `broken` fail to load, those in `failing_prepare` load a
    /// controller whose `prepare` fails.
    pub struct MockViewLoader {
        pub log: HookLog,
        pub broken: HashSet<String>,
        pub failing_prepare: HashSet<String>,
    }

    impl MockViewLoader {
        pub fn new(log: HookLog) -> Self {
            Self {
                log,
                broken: HashSet::new(),
                failing_prepare: HashSet::new(),
            }
        }
    }

    impl ViewLoader for MockViewLoader {
        fn load(&self, resource: &ViewResource) -> Result<LoadedView, ScreenError> {
            let location = resource.location();
            if self.broken.contains(&location) {
                return Err(ScreenError::load(location, "broken definition"));
            }
            let controller = if self.failing_prepare.contains(&location) {
                RecordingController::failing(self.log.clone())
            } else {
                RecordingController::new(self.log.clone())
            };
            Ok(LoadedView::new(View::new(location), Box::new(controller)))
        }
    }
}
