//! TOML view definitions.
//!
//! ```toml
//! title = "Home"
//! body = ["Welcome", "Press 2 for settings"]
//! style_classes = ["screen"]
//! controller = "trace"
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::domain::controller::ScreenController;
use crate::domain::entities::{View, ViewResource};
use crate::domain::errors::ScreenError;
use crate::domain::ports::{LoadedView, ViewLoader};

/// Controller kind used when a definition names none.
pub const DEFAULT_CONTROLLER: &str = "plain";

/// Body text, either one multi-line string or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BodyText {
    Text(String),
    Lines(Vec<String>),
}

impl BodyText {
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Text(text) => text.lines().map(str::to_string).collect(),
            Self::Lines(lines) => lines,
        }
    }
}

impl Default for BodyText {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: BodyText,
    #[serde(default)]
    pub style_classes: Vec<String>,
    #[serde(default)]
    pub controller: Option<String>,
}

impl ViewDefinition {
    /// Parses a definition from TOML text.
    ///
    /// # Errors
    /// Returns the TOML error if the text is not a valid definition.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn controller_kind(&self) -> &str {
        self.controller.as_deref().unwrap_or(DEFAULT_CONTROLLER)
    }

    fn into_view(self) -> View {
        View {
            title: self.title,
            body: self.body.into_lines(),
            style_classes: self.style_classes,
            ..View::default()
        }
    }
}

/// Controller without behavior.
#[derive(Debug, Default)]
pub struct PlainController;

impl ScreenController for PlainController {}

type ControllerFactory = Box<dyn Fn() -> Box<dyn ScreenController>>;

/// Maps controller kinds named in view definitions to constructors.
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// Registry knowing only the `plain` controller.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(DEFAULT_CONTROLLER, || Box::new(PlainController));
        registry
    }

    /// Registers `factory` for `kind`, replacing any previous one.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn ScreenController> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    #[must_use]
    pub fn create(&self, kind: &str) -> Option<Box<dyn ScreenController>> {
        self.factories.get(kind).map(|factory| factory())
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Loader reading [`ViewDefinition`]s and instantiating their controller
/// through a [`ControllerRegistry`].
#[derive(Debug, Default)]
pub struct TomlViewLoader {
    controllers: ControllerRegistry,
}

impl TomlViewLoader {
    #[must_use]
    pub const fn new(controllers: ControllerRegistry) -> Self {
        Self { controllers }
    }

    #[must_use]
    pub const fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }
}

impl ViewLoader for TomlViewLoader {
    fn load(&self, resource: &ViewResource) -> Result<LoadedView, ScreenError> {
        let location = resource.location();
        let content = resource
            .read_to_string()
            .map_err(|e| ScreenError::load(location.clone(), e.to_string()))?;
        let definition = ViewDefinition::parse(&content)
            .map_err(|e| ScreenError::load(location.clone(), e.message().to_string()))?;

        let kind = definition.controller_kind().to_string();
        let controller = self.controllers.create(&kind).ok_or_else(|| {
            ScreenError::load(location.clone(), format!("unknown controller '{kind}'"))
        })?;

        debug!(resource = %location, controller = %kind, "View definition loaded");
        Ok(LoadedView::new(definition.into_view(), controller))
    }
}
