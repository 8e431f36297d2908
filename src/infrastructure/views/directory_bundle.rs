//! Unpacked view bundle on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::ScreenName;
use crate::domain::entities::ViewResource;
use crate::domain::errors::ScreenError;
use crate::domain::ports::ViewBundle;

/// Directory below the bundle root holding view definitions.
pub const VIEW_DIR: &str = "view";

/// Bundle read from a directory laid out as `view/<Name>View.toml` and
/// `skin/<skin>/css/<name>.css`.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
}

impl DirectoryBundle {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ViewBundle for DirectoryBundle {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn discover_views(&self) -> Result<Vec<(ScreenName, ViewResource)>, ScreenError> {
        let view_dir = self.root.join(VIEW_DIR);
        if !view_dir.is_dir() {
            debug!(path = %view_dir.display(), "No view directory in bundle");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&view_dir)
            .map_err(|e| ScreenError::resolution(view_dir.display().to_string(), e.to_string()))?;

        Ok(view_files(
            &view_dir,
            entries.map(|entry| entry.map(|entry| entry.path())),
        ))
    }

    fn resolve(&self, path: &str) -> Option<ViewResource> {
        let candidate = self.root.join(path);
        candidate.is_file().then_some(ViewResource::File(candidate))
    }
}

/// Keeps the `*View.toml` files among `entries`, sorted by path. An entry
/// that cannot be read is logged and skipped.
fn view_files(
    view_dir: &Path,
    entries: impl Iterator<Item = io::Result<PathBuf>>,
) -> Vec<(ScreenName, ViewResource)> {
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                warn!(path = %view_dir.display(), error = %e, "Skipping unreadable view entry");
            }
        }
    }
    files.sort();

    files
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?;
            let name = ScreenName::from_view_file(file_name)?;
            Some((name, ViewResource::File(path)))
        })
        .collect()
}
