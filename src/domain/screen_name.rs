//! Screen identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File name suffix that marks a view definition.
pub const VIEW_FILE_SUFFIX: &str = "View.toml";

/// Case-normalized screen identifier.
///
/// The name is the only key tying a view, its controller and its show
/// history together, so every constructor trims and lowercases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScreenName(String);

impl ScreenName {
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// Derives a screen name from a view file name such as `SettingsView.toml`.
    ///
    /// Returns `None` if the file does not follow the naming convention.
    #[must_use]
    pub fn from_view_file(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(VIEW_FILE_SUFFIX)?;
        if stem.trim().is_empty() {
            return None;
        }
        Some(Self::new(stem))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Null-safe comparison against a raw, not yet normalized name.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other.trim().to_lowercase()
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScreenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScreenName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScreenName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ScreenName> for String {
    fn from(value: ScreenName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Home", "home" ; "lowercases")]
    #[test_case("  settings ", "settings" ; "trims")]
    #[test_case("GAME_over", "game_over" ; "keeps_underscores")]
    fn test_new_normalizes(raw: &str, expected: &str) {
        assert_eq!(ScreenName::new(raw).as_str(), expected);
    }

    #[test_case("HomeView.toml", Some("home") ; "simple")]
    #[test_case("HighScoreView.toml", Some("highscore") ; "camel_case")]
    #[test_case("View.toml", None ; "empty_stem")]
    #[test_case("Home.toml", None ; "missing_suffix")]
    #[test_case("HomeView.fxml", None ; "wrong_extension")]
    fn test_from_view_file(file: &str, expected: Option<&str>) {
        assert_eq!(
            ScreenName::from_view_file(file).as_ref().map(ScreenName::as_str),
            expected
        );
    }

    #[test]
    fn test_matches_ignores_case() {
        let name = ScreenName::new("home");
        assert!(name.matches("HOME"));
        assert!(!name.matches("settings"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        #[derive(Deserialize)]
        struct Wrapper {
            name: ScreenName,
        }

        let wrapper: Wrapper = toml::from_str(r#"name = "Settings""#).unwrap();
        assert_eq!(wrapper.name.as_str(), "settings");
    }
}
