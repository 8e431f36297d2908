//! Screen bootstrap use case.

use tracing::{info, warn};

use crate::application::services::{InitReport, ScreenManager};
use crate::domain::ScreenName;
use crate::domain::ports::ViewBundle;

/// Result of bootstrapping the screens of an application.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOutcome {
    pub report: InitReport,
    pub stylesheets: usize,
    /// Screen that was shown first, if any.
    pub initial: Option<ScreenName>,
}

/// Registers every view of a bundle, applies the skin and shows the first
/// screen.
pub struct BootstrapScreensUseCase<'a> {
    bundle: &'a dyn ViewBundle,
}

impl<'a> BootstrapScreensUseCase<'a> {
    #[must_use]
    pub const fn new(bundle: &'a dyn ViewBundle) -> Self {
        Self { bundle }
    }

    /// Runs discovery, stylesheet resolution and the initial show.
    ///
    /// `initial` falls back to the first registered screen if it is unset or
    /// unknown.
    pub fn execute(
        &self,
        manager: &mut ScreenManager,
        skin: Option<&str>,
        initial: Option<&str>,
    ) -> BootstrapOutcome {
        let report = manager.init_screens(self.bundle);

        if let Some(skin) = skin {
            manager.set_skin(skin);
        }
        let stylesheets = manager.init_stylesheets(self.bundle);

        let initial = match initial {
            Some(name) if manager.contains_screen(name) => Some(ScreenName::new(name)),
            Some(name) => {
                warn!(screen = name, "Configured initial screen is not registered");
                manager.screen_names().first().cloned()
            }
            None => manager.screen_names().first().cloned(),
        };

        let initial = initial.filter(|name| manager.show_screen(name.as_str()));

        info!(
            bundle = %self.bundle.location(),
            screens = report.registered.len(),
            stylesheets,
            initial = ?initial,
            "Screens bootstrapped"
        );

        BootstrapOutcome {
            report,
            stylesheets,
            initial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::controller::mock::HookLog;
    use crate::domain::entities::{AppInfo, ViewResource};
    use crate::domain::ports::mocks::{MockViewBundle, MockViewLoader};

    fn bundle_with(names: &'static [&'static str]) -> MockViewBundle {
        let mut bundle = MockViewBundle::new();
        bundle.expect_discover_views().returning(move || {
            Ok(names
                .iter()
                .map(|name| {
                    (
                        ScreenName::new(name),
                        ViewResource::Entry {
                            path: format!("view/{name}View.toml"),
                            contents: String::new(),
                        },
                    )
                })
                .collect())
        });
        bundle.expect_location().return_const("memory".to_string());
        bundle
    }

    fn manager() -> ScreenManager {
        let log: HookLog = HookLog::default();
        ScreenManager::new(AppInfo::default(), Box::new(MockViewLoader::new(log)))
    }

    #[test]
    fn test_shows_configured_initial_screen() {
        let mut bundle = bundle_with(&["home", "settings"]);
        bundle
            .expect_resolve()
            .withf(|path| path.starts_with("skin/dark/"))
            .returning(|path| {
                Some(ViewResource::Entry {
                    path: path.to_string(),
                    contents: String::new(),
                })
            });
        let mut manager = manager();

        let outcome =
            BootstrapScreensUseCase::new(&bundle).execute(&mut manager, Some("dark"), Some("Settings"));

        assert_eq!(outcome.initial, Some(ScreenName::new("settings")));
        assert_eq!(outcome.stylesheets, 2);
        assert_eq!(manager.skin(), "dark");
        assert!(manager.current_screen_name_matches("settings"));
    }

    #[test]
    fn test_falls_back_to_first_screen() {
        let mut bundle = bundle_with(&["home", "settings"]);
        bundle.expect_resolve().returning(|_| None);
        let mut manager = manager();

        let outcome =
            BootstrapScreensUseCase::new(&bundle).execute(&mut manager, None, Some("missing"));

        assert_eq!(outcome.initial, Some(ScreenName::new("home")));
        assert_eq!(outcome.stylesheets, 0);
        assert_eq!(manager.skin(), "default");
    }

    #[test]
    fn test_empty_bundle_shows_nothing() {
        let bundle = bundle_with(&[]);
        let mut manager = manager();

        let outcome = BootstrapScreensUseCase::new(&bundle).execute(&mut manager, None, None);

        assert!(outcome.initial.is_none());
        assert!(outcome.report.registered.is_empty());
        assert_eq!(manager.current_screen_name(), None);
    }
}
