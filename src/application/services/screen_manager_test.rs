#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::application::services::screen_manager::{ScreenManager, loaded};
    use crate::domain::controller::mock::HookLog;
    use crate::domain::entities::{
        AppInfo, HostChild, HostEffect, OverlayKind, Transform, View, ViewResource,
    };
    use crate::domain::ports::mocks::{MockViewBundle, MockViewLoader, SteppedTransition};
    use crate::domain::{ScreenContext, ScreenController, ScreenError, ScreenName};

    const TICK: Duration = Duration::from_millis(16);

    fn resource(name: &str) -> ViewResource {
        ViewResource::Entry {
            path: format!("view/{name}View.toml"),
            contents: String::new(),
        }
    }

    fn manager_with(names: &[&str]) -> (ScreenManager, HookLog) {
        let log: HookLog = Rc::default();
        let mut manager = ScreenManager::new(
            AppInfo::new("test", "0.0.0"),
            Box::new(MockViewLoader::new(log.clone())),
        );
        for name in names {
            manager.register_screen(*name, &resource(name)).unwrap();
        }
        log.borrow_mut().clear();
        (manager, log)
    }

    fn take(log: &HookLog) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn displayed(manager: &ScreenManager) -> Option<String> {
        manager
            .host()
            .displayed_screen()
            .map(|screen| screen.name.to_string())
    }

    #[test]
    fn test_lookup_before_and_after_registration() {
        let (mut manager, _log) = manager_with(&[]);

        assert!(manager.screen("home").unwrap_err().is_not_found());
        assert!(manager.controller("home").err().is_some_and(|e| e.is_not_found()));

        manager.register_screen("home", &resource("home")).unwrap();
        assert!(manager.screen("home").is_ok());
        assert!(manager.controller("HOME").is_ok());

        assert!(manager.remove_screen("home"));
        assert!(manager.screen("home").unwrap_err().is_not_found());
        assert!(manager.controller("home").err().is_some_and(|e| e.is_not_found()));
        assert!(!manager.remove_screen("home"));
    }

    #[test]
    fn test_prepare_runs_once_per_registration_and_never_on_show() {
        let log: HookLog = Rc::default();
        let mut manager = ScreenManager::new(
            AppInfo::default(),
            Box::new(MockViewLoader::new(log.clone())),
        );
        manager.register_screen("home", &resource("home")).unwrap();
        assert_eq!(take(&log), vec!["home:attach", "home:prepare"]);

        manager.show_screen("home");
        manager.show_screen("home");
        assert!(
            !take(&log)
                .iter()
                .any(|entry| entry.ends_with("prepare") || entry.ends_with("attach"))
        );
    }

    #[test]
    fn test_failed_prepare_leaves_registry_untouched() {
        let log: HookLog = Rc::default();
        let mut loader = MockViewLoader::new(log.clone());
        loader
            .failing_prepare
            .insert(resource("broken").location());
        let mut manager = ScreenManager::new(AppInfo::default(), Box::new(loader));

        let err = manager
            .register_screen("broken", &resource("broken"))
            .unwrap_err();

        assert!(err.is_load_error());
        assert!(!manager.contains_screen("broken"));
        assert!(manager.screen_names().is_empty());
    }

    #[test]
    fn test_register_same_name_replaces_entry() {
        let (mut manager, _log) = manager_with(&["home"]);
        let first = manager.screen("home").unwrap().clone();

        manager
            .register_loaded("Home", loaded(View::new("Replacement"), NoopController))
            .unwrap();

        let second = manager.screen("home").unwrap();
        assert!(!first.ptr_eq(second));
        assert_eq!(second.borrow().title, "Replacement");
        assert_eq!(manager.screen_names(), &[ScreenName::new("home")]);
    }

    #[test]
    fn test_first_show_hook_sequence() {
        let (mut manager, log) = manager_with(&["home"]);

        assert!(manager.show_screen("home"));

        assert_eq!(
            take(&log),
            vec![
                "home:before_first_show",
                "home:before_show",
                "home:first_show",
                "home:show",
            ]
        );
        assert_eq!(displayed(&manager).as_deref(), Some("home"));
    }

    #[test]
    fn test_second_show_skips_first_hooks() {
        let (mut manager, log) = manager_with(&["home", "settings"]);
        manager.show_screen("home");
        manager.show_screen("settings");
        take(&log);

        manager.show_screen("home");

        assert_eq!(take(&log), vec!["home:before_show", "home:show"]);
    }

    #[test]
    fn test_navigation_scenario() {
        let (mut manager, log) = manager_with(&["home", "settings"]);

        manager.show_screen("home");
        assert!(manager.current_screen_name_matches("home"));
        assert_eq!(manager.previous_screen_name(), None);
        assert!(manager.has_been_shown("home"));
        assert_eq!(manager.shown_screens().len(), 1);

        manager.show_screen("settings");
        assert!(manager.current_screen_name_matches("settings"));
        assert!(manager.previous_screen_name_matches("home"));

        take(&log);
        manager.show_screen("home");
        assert!(manager.current_screen_name_matches("home"));
        assert!(manager.previous_screen_name_matches("settings"));
        assert_eq!(take(&log), vec!["home:before_show", "home:show"]);
        assert_eq!(manager.host().screen_count(), 1);
    }

    #[test]
    fn test_showing_current_screen_again_updates_previous() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.show_screen("home");
        manager.show_screen("home");

        assert!(manager.current_screen_name_matches("home"));
        assert!(manager.previous_screen_name_matches("home"));
        assert_eq!(manager.host().screen_count(), 1);
    }

    #[test]
    fn test_show_missing_screen_changes_nothing() {
        let (mut manager, log) = manager_with(&[]);

        assert!(!manager.show_screen("missing"));
        assert_eq!(manager.current_screen_name(), None);
        assert_eq!(manager.previous_screen_name(), None);
        assert!(manager.host().children().is_empty());
        assert!(take(&log).is_empty());

        let (mut manager, _log) = manager_with(&["home"]);
        manager.show_screen("home");
        assert!(matches!(
            manager.try_show_screen("missing"),
            Err(ScreenError::NotFound { .. })
        ));
        assert!(manager.current_screen_name_matches("home"));
        assert_eq!(manager.previous_screen_name(), None);
    }

    #[test]
    fn test_show_resets_transform() {
        let (mut manager, _log) = manager_with(&["home", "settings"]);
        manager.show_screen("home");
        manager.screen("home").unwrap().set_transform(Transform {
            opacity: 0.0,
            scale_x: 0.5,
            scale_y: 2.0,
            scale_z: 3.0,
            translate_x: 40.0,
            translate_y: -3.0,
            translate_z: 1.0,
            rotate: 45.0,
        });
        manager.show_screen("settings");

        manager.show_screen("home");

        assert!(manager.screen("home").unwrap().transform().is_identity());
    }

    #[test]
    fn test_removed_current_screen_keeps_navigation() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.show_screen("home");

        assert!(manager.remove_screen("home"));

        assert!(manager.current_screen_name_matches("home"));
        assert_eq!(displayed(&manager).as_deref(), Some("home"));
    }

    #[test]
    fn test_transition_defers_show_hooks() {
        let (mut manager, log) = manager_with(&["home", "settings"]);
        manager.show_screen("home");
        take(&log);

        assert!(manager.show_screen_with("settings", Box::new(SteppedTransition::new(2))));

        assert_eq!(
            take(&log),
            vec!["settings:before_first_show", "settings:before_show"]
        );
        assert!(manager.current_screen_name_matches("settings"));
        assert!(manager.previous_screen_name_matches("home"));
        assert_eq!(displayed(&manager).as_deref(), Some("home"));
        assert!(manager.has_transition_in_flight());

        assert_eq!(manager.tick(TICK), 0);
        assert!(take(&log).is_empty());

        assert_eq!(manager.tick(TICK), 1);
        assert_eq!(take(&log), vec!["settings:first_show", "settings:show"]);
        assert_eq!(displayed(&manager).as_deref(), Some("settings"));
        assert_eq!(manager.host().screen_count(), 1);
        assert!(!manager.has_transition_in_flight());
        assert!(manager.has_been_shown("settings"));
    }

    #[test]
    fn test_transition_without_displayed_screen() {
        let (mut manager, log) = manager_with(&["home"]);

        assert!(manager.show_screen_with("home", Box::new(SteppedTransition::new(1))));
        manager.tick(TICK);

        assert_eq!(
            take(&log),
            vec![
                "home:before_first_show",
                "home:before_show",
                "home:first_show",
                "home:show",
            ]
        );
        assert_eq!(displayed(&manager).as_deref(), Some("home"));
    }

    #[test]
    fn test_transition_to_missing_screen_fails() {
        let (mut manager, _log) = manager_with(&[]);

        assert!(!manager.show_screen_with("missing", Box::new(SteppedTransition::new(1))));
        assert!(!manager.has_transition_in_flight());
        assert_eq!(manager.current_screen_name(), None);
    }

    #[test]
    fn test_stuck_transition_never_runs_show_hooks() {
        let (mut manager, log) = manager_with(&["home"]);
        manager.show_screen_with("home", Box::new(SteppedTransition::new(usize::MAX)));
        take(&log);

        for _ in 0..100 {
            manager.tick(TICK);
        }

        assert!(take(&log).is_empty());
        assert!(!manager.has_been_shown("home"));
    }

    // Overlapping transitions are not queued or cancelled. The outcome is
    // unspecified; this documents what currently happens.
    #[test]
    fn test_overlapping_transitions_are_not_queued() {
        let (mut manager, log) = manager_with(&["home", "settings", "about"]);
        manager.show_screen("home");
        take(&log);

        manager.show_screen_with("settings", Box::new(SteppedTransition::new(1)));
        manager.show_screen_with("about", Box::new(SteppedTransition::new(1)));

        assert!(manager.current_screen_name_matches("about"));
        assert!(manager.previous_screen_name_matches("settings"));

        assert_eq!(manager.tick(TICK), 2);
        let hooks = take(&log);
        assert!(hooks.contains(&"settings:first_show".to_string()));
        assert!(!hooks.contains(&"settings:show".to_string()));
        assert!(hooks.contains(&"about:show".to_string()));
        assert!(!manager.has_transition_in_flight());
    }

    #[test]
    fn test_superseded_show_skips_on_show() {
        let (mut manager, log) = manager_with(&["home", "settings"]);
        manager.show_screen_with("settings", Box::new(SteppedTransition::new(3)));
        manager.show_screen("home");
        take(&log);

        manager.tick(TICK);
        manager.tick(TICK);
        manager.tick(TICK);

        assert_eq!(take(&log), vec!["settings:first_show"]);
        assert!(manager.has_been_shown("settings"));

        // The finishing transition places its own target, so the host no
        // longer matches the navigation state.
        assert!(manager.current_screen_name_matches("home"));
        assert_eq!(displayed(&manager).as_deref(), Some("settings"));
        assert_eq!(manager.host().screen_count(), 1);
    }

    #[test]
    fn test_loading_indicator_overlay_is_idempotent() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.resize_host(100, 30);
        manager.show_screen("home");

        manager.hide_loading_indicator_overlay();
        assert!(!manager.is_loading_indicator_visible());

        manager.show_loading_indicator_overlay();
        manager.show_loading_indicator_overlay();
        assert_eq!(
            manager
                .host()
                .overlay_count(OverlayKind::LoadingIndicator),
            1
        );
        assert!(manager.host().children()[0].is_screen());

        manager.hide_loading_indicator_overlay();
        assert!(!manager.is_loading_indicator_visible());
        manager.hide_loading_indicator_overlay();
        assert!(!manager.is_loading_indicator_visible());
    }

    #[test]
    fn test_loading_indicator_tracks_host_size() {
        let (mut manager, _log) = manager_with(&[]);
        manager.show_loading_indicator_overlay();
        manager.resize_host(42, 7);

        let overlay_size = manager.host().children().iter().find_map(|child| match child {
            HostChild::Overlay(overlay) => Some(overlay.size),
            HostChild::Screen { .. } => None,
        });
        assert_eq!(overlay_size.map(|s| (s.width, s.height)), Some((42, 7)));
    }

    #[test]
    fn test_shade_and_unshade() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.show_screen("home");

        manager.unshade_screen();
        assert!(!manager.is_shaded());

        manager.shade_screen();
        manager.shade_screen();
        assert!(manager.is_shaded());
        assert_eq!(manager.host().overlay_count(OverlayKind::Shade), 1);
        assert!(matches!(
            manager.host().effect(),
            Some(HostEffect::Blur { radius }) if (radius - 5.0).abs() < f32::EPSILON
        ));

        manager.unshade_screen();
        assert!(!manager.is_shaded());
        assert_eq!(manager.host().effect(), None);
    }

    #[test]
    fn test_screen_under_overlays_is_replaced() {
        let (mut manager, _log) = manager_with(&["home", "settings"]);
        manager.show_screen("home");
        manager.show_loading_indicator_overlay();
        manager.shade_screen();

        manager.show_screen("settings");

        assert_eq!(displayed(&manager).as_deref(), Some("settings"));
        assert_eq!(manager.host().screen_count(), 1);
        assert_eq!(manager.host().children().len(), 3);
    }

    #[test]
    fn test_add_stylesheet() {
        let (mut manager, _log) = manager_with(&["home"]);

        assert!(manager.add_stylesheet_to_screen("home", "skin/dark/css/home.css"));
        assert!(!manager.add_stylesheet_to_screen("missing", "skin/dark/css/missing.css"));

        assert_eq!(
            manager.screen("home").unwrap().borrow().stylesheets,
            vec!["skin/dark/css/home.css".to_string()]
        );
    }

    #[test]
    fn test_init_stylesheets_skips_missing_resources() {
        let (mut manager, _log) = manager_with(&["home", "settings"]);
        assert_eq!(manager.skin(), "default");

        let mut bundle = MockViewBundle::new();
        bundle.expect_resolve().returning(|path| {
            (path == "skin/default/css/home.css").then(|| ViewResource::Entry {
                path: path.to_string(),
                contents: String::new(),
            })
        });

        assert_eq!(manager.init_stylesheets(&bundle), 1);
        assert_eq!(
            manager.screen("home").unwrap().borrow().stylesheets,
            vec!["packed:skin/default/css/home.css".to_string()]
        );
        assert!(
            manager
                .screen("settings")
                .unwrap()
                .borrow()
                .stylesheets
                .is_empty()
        );
    }

    #[test]
    fn test_init_stylesheets_uses_selected_skin() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.set_skin("dark");

        let mut bundle = MockViewBundle::new();
        bundle
            .expect_resolve()
            .withf(|path| path == "skin/dark/css/home.css")
            .times(1)
            .returning(|path| {
                Some(ViewResource::Entry {
                    path: path.to_string(),
                    contents: String::new(),
                })
            });

        assert_eq!(manager.init_stylesheets(&bundle), 1);
    }

    #[test]
    fn test_init_screens_skips_failing_entries() {
        let log: HookLog = Rc::default();
        let mut loader = MockViewLoader::new(log.clone());
        loader.broken.insert(resource("broken").location());
        loader
            .failing_prepare
            .insert(resource("grumpy").location());
        let mut manager = ScreenManager::new(AppInfo::default(), Box::new(loader));

        let mut bundle = MockViewBundle::new();
        bundle.expect_discover_views().returning(|| {
            Ok(["home", "broken", "grumpy", "settings"]
                .into_iter()
                .map(|name| (ScreenName::new(name), resource(name)))
                .collect())
        });

        let report = manager.init_screens(&bundle);

        assert_eq!(
            report.registered,
            vec![ScreenName::new("home"), ScreenName::new("settings")]
        );
        assert_eq!(
            report.failed,
            vec![ScreenName::new("broken"), ScreenName::new("grumpy")]
        );
        assert_eq!(
            manager.screen_names(),
            &[ScreenName::new("home"), ScreenName::new("settings")]
        );
    }

    #[test]
    fn test_init_screens_survives_discovery_failure() {
        let (mut manager, _log) = manager_with(&[]);
        let mut bundle = MockViewBundle::new();
        bundle
            .expect_discover_views()
            .returning(|| Err(ScreenError::resolution("bundle", "permission denied")));
        bundle
            .expect_location()
            .return_const("bundle".to_string());

        let report = manager.init_screens(&bundle);

        assert!(report.registered.is_empty());
        assert!(manager.screen_names().is_empty());
    }

    #[test]
    fn test_close_request_flag() {
        let (mut manager, _log) = manager_with(&[]);
        let observer = manager.close_request_receiver();

        assert!(!manager.is_close_request_active());
        manager.on_close_requested();
        assert!(manager.is_close_request_active());
        assert!(*observer.borrow());

        manager.clear_close_request();
        assert!(!*observer.borrow());
    }

    #[tokio::test]
    async fn test_close_request_wakes_observers() {
        let (mut manager, _log) = manager_with(&[]);
        let mut observer = manager.close_request_receiver();

        manager.on_close_requested();

        observer.changed().await.unwrap();
        assert!(*observer.borrow_and_update());
    }

    /// Controller that navigates onwards from its `on_show` hook.
    struct ForwardingController {
        target: &'static str,
        context: Option<ScreenContext>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl ScreenController for ForwardingController {
        fn attach(&mut self, context: ScreenContext) {
            self.context = Some(context);
        }

        fn on_show(&mut self) {
            if let Some(ctx) = &self.context {
                self.seen.borrow_mut().push(format!(
                    "{} after {:?}",
                    ctx.name(),
                    ctx.previous_screen_name().map(|n| n.to_string())
                ));
                ctx.request_show(self.target);
                ctx.send(crate::domain::ScreenRequest::ShowLoadingIndicator);
            }
        }
    }

    struct NoopController;

    impl ScreenController for NoopController {}

    #[test]
    fn test_controller_requests_are_processed() {
        let (mut manager, log) = manager_with(&["settings"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        manager
            .register_loaded(
                "splash",
                loaded(
                    View::new("Splash"),
                    ForwardingController {
                        target: "settings",
                        context: None,
                        seen: seen.clone(),
                    },
                ),
            )
            .unwrap();

        manager.show_screen("splash");
        assert!(manager.current_screen_name_matches("splash"));
        assert_eq!(seen.borrow().as_slice(), ["splash after None"]);

        assert_eq!(manager.process_requests(), 2);
        assert!(manager.current_screen_name_matches("settings"));
        assert!(manager.previous_screen_name_matches("splash"));
        assert!(manager.is_loading_indicator_visible());
        assert!(take(&log).contains(&"settings:show".to_string()));
    }

    #[test]
    fn test_show_requests_wait_for_running_transition() {
        let (mut manager, log) = manager_with(&["settings", "home"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        manager
            .register_loaded(
                "splash",
                loaded(
                    View::new("Splash"),
                    ForwardingController {
                        target: "settings",
                        context: None,
                        seen,
                    },
                ),
            )
            .unwrap();
        manager.show_screen("splash");
        manager.show_screen_with("home", Box::new(SteppedTransition::new(2)));
        take(&log);

        assert_eq!(manager.process_requests(), 0);
        assert!(manager.has_pending_requests());
        assert!(!manager.is_loading_indicator_visible());
        assert!(manager.current_screen_name_matches("home"));

        assert_eq!(manager.tick(TICK), 0);
        assert_eq!(manager.process_requests(), 0);
        assert_eq!(manager.tick(TICK), 1);
        assert_eq!(displayed(&manager).as_deref(), Some("home"));

        assert_eq!(manager.process_requests(), 2);
        assert!(!manager.has_pending_requests());
        assert!(manager.current_screen_name_matches("settings"));
        assert!(manager.previous_screen_name_matches("home"));
        assert_eq!(displayed(&manager).as_deref(), Some("settings"));
        assert_eq!(manager.host().screen_count(), 1);
        assert!(manager.is_loading_indicator_visible());
        assert!(take(&log).contains(&"settings:show".to_string()));
    }

    #[test]
    fn test_immediate_show_replaces_only_displayed_screen() {
        let (mut manager, _log) = manager_with(&["home", "settings"]);
        manager.show_screen("home");
        manager.show_loading_indicator_overlay();

        manager.show_screen("settings");

        assert_eq!(displayed(&manager).as_deref(), Some("settings"));
        assert_eq!(manager.host().screen_count(), 1);
        assert_eq!(
            manager.host().children()[1].overlay_kind(),
            Some(OverlayKind::LoadingIndicator)
        );
    }

    #[test]
    fn test_debug_lists_registered_screens() {
        let (mut manager, _log) = manager_with(&["home"]);
        manager.show_screen("home");

        let debug = format!("{manager:?}");
        assert!(debug.contains("home"));
        assert!(debug.contains("transitions: 0"));
    }
}
