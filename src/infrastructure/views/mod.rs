//! View bundle and view definition adapters.

pub mod directory_bundle;
pub mod packed_bundle;
pub mod toml_loader;

use std::path::Path;

use tracing::info;

pub use directory_bundle::DirectoryBundle;
pub use packed_bundle::{PackedBundle, PackedEntry};
pub use toml_loader::{ControllerRegistry, PlainController, TomlViewLoader, ViewDefinition};

use crate::domain::errors::ScreenError;
use crate::domain::ports::ViewBundle;

/// Opens the bundle at `path`: a file is read as a packed bundle, anything
/// else as a bundle directory.
///
/// # Errors
/// Returns `ScreenError::ResourceResolution` if a packed bundle cannot be read.
pub fn open_bundle(path: &Path) -> Result<Box<dyn ViewBundle>, ScreenError> {
    if path.is_file() {
        info!(path = %path.display(), "Opening packed view bundle");
        Ok(Box::new(PackedBundle::open(path)?))
    } else {
        info!(path = %path.display(), "Opening view bundle directory");
        Ok(Box::new(DirectoryBundle::new(path)))
    }
}
