//! Single-file view bundle.
//!
//! A packed bundle is a TOML document listing every file of an application
//! bundle:
//!
//! ```toml
//! [[entry]]
//! path = "demo/view/HomeView.toml"
//! contents = """
//! title = "Home"
//! controller = "plain"
//! """
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::ScreenName;
use crate::domain::entities::ViewResource;
use crate::domain::errors::ScreenError;
use crate::domain::ports::ViewBundle;

use super::directory_bundle::VIEW_DIR;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackedEntry {
    pub path: String,
    #[serde(default)]
    pub contents: String,
}

#[derive(Debug, Deserialize)]
struct PackedManifest {
    #[serde(default, rename = "entry")]
    entries: Vec<PackedEntry>,
}

#[derive(Debug, Clone)]
pub struct PackedBundle {
    location: String,
    entries: Vec<PackedEntry>,
}

impl PackedBundle {
    /// Reads a packed bundle file.
    ///
    /// # Errors
    /// Returns `ScreenError::ResourceResolution` if the file cannot be read or
    /// is not a valid bundle.
    pub fn open(path: &Path) -> Result<Self, ScreenError> {
        let location = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| ScreenError::resolution(location.clone(), e.to_string()))?;
        Self::parse(location, &content)
    }

    /// Parses a packed bundle from its TOML text.
    ///
    /// # Errors
    /// Returns `ScreenError::ResourceResolution` if the text is not a valid bundle.
    pub fn parse(location: impl Into<String>, content: &str) -> Result<Self, ScreenError> {
        let location = location.into();
        let manifest: PackedManifest = toml::from_str(content)
            .map_err(|e| ScreenError::resolution(location.clone(), e.to_string()))?;
        Ok(Self::from_entries(location, manifest.entries))
    }

    #[must_use]
    pub fn from_entries(
        location: impl Into<String>,
        entries: impl IntoIterator<Item = PackedEntry>,
    ) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            location: location.into(),
            entries,
        }
    }

    fn is_view_entry(path: &str) -> bool {
        let mut segments: Vec<_> = path.split('/').collect();
        segments.pop();
        segments.contains(&VIEW_DIR)
    }

    fn resource(entry: &PackedEntry) -> ViewResource {
        ViewResource::Entry {
            path: entry.path.clone(),
            contents: entry.contents.clone(),
        }
    }
}

impl ViewBundle for PackedBundle {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn discover_views(&self) -> Result<Vec<(ScreenName, ViewResource)>, ScreenError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| Self::is_view_entry(&entry.path))
            .filter_map(|entry| {
                let file_name = entry.path.rsplit('/').next()?;
                let name = ScreenName::from_view_file(file_name)?;
                Some((name, Self::resource(entry)))
            })
            .collect())
    }

    fn resolve(&self, path: &str) -> Option<ViewResource> {
        let nested = format!("/{path}");
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .or_else(|| self.entries.iter().find(|entry| entry.path.ends_with(&nested)))
            .map(Self::resource)
    }
}
