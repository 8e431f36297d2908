//! Loadable resource references.

use std::fmt;
use std::path::PathBuf;

/// Reference to a view definition or stylesheet inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResource {
    /// File in an unpacked bundle directory.
    File(PathBuf),
    /// Entry of a packed bundle, contents held in memory.
    Entry { path: String, contents: String },
}

impl ViewResource {
    /// Location string used for logging and stylesheet references.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Entry { path, .. } => format!("packed:{path}"),
        }
    }

    /// Reads the resource contents.
    ///
    /// # Errors
    /// Returns IO error if a file resource cannot be read.
    pub fn read_to_string(&self) -> std::io::Result<String> {
        match self {
            Self::File(path) => std::fs::read_to_string(path),
            Self::Entry { contents, .. } => Ok(contents.clone()),
        }
    }
}

impl fmt::Display for ViewResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}
