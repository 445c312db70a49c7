//! Application state types and enums.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use dexview_fetch::{FetchError, FetchProgress, PageRequest};
use dexview_core::CatalogueBatch;

use crate::theme::ThemeVariant;

/// Application mode representing the current UI state.
/// Loading is not a mode: pages load in the background while the user
/// keeps browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    /// Typing into the search bar.
    Search,
    /// Detail overlay for the focused item.
    Detail,
    Help,
    Quit,
}

/// Tab shown in the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr)]
pub enum DetailTab {
    #[default]
    Main,
    Statistics,
}

impl DetailTab {
    /// Move to next tab (cyclic).
    pub fn next(self) -> Self {
        let next = (self as usize + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }

    /// Move to previous tab (cyclic).
    pub fn prev(self) -> Self {
        let count = Self::iter().count();
        let prev = (self as usize + count - 1) % count;
        Self::from_repr(prev).unwrap_or_default()
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    /// The request was refused; nothing went wrong.
    Warning,
    Error,
}

/// Result from a background page load.
pub enum LoadResult {
    Progress(FetchProgress),
    Complete {
        request: PageRequest,
        result: Result<CatalogueBatch, FetchError>,
    },
}

/// Persistent user settings stored in config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Colour theme.
    pub theme: ThemeVariant,
    /// Whether to load the first page on startup.
    pub load_on_startup: bool,
    /// Items per page, if different from the default.
    pub page_size: Option<usize>,
    /// Upper bound on loaded items, if different from the default.
    pub max_items: Option<usize>,
    /// API root, if different from the default.
    pub api_base: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            load_on_startup: true,
            page_size: None,
            max_items: None,
            api_base: None,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dexview").join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a file, or return defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to a file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detail_tab_cycles() {
        assert_eq!(DetailTab::Main.next(), DetailTab::Statistics);
        assert_eq!(DetailTab::Statistics.next(), DetailTab::Main);
        assert_eq!(DetailTab::Main.prev(), DetailTab::Statistics);
        assert_eq!(DetailTab::Statistics.to_string(), "Statistics");
    }

    #[test]
    fn test_settings_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.toml");

        let settings = UserSettings {
            theme: ThemeVariant::Light,
            page_size: Some(30),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme = \"light\""));
        assert_eq!(UserSettings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_or_invalid_settings_use_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            UserSettings::load_from(&temp.path().join("absent.toml")),
            UserSettings::default()
        );

        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "theme = [").unwrap();
        assert_eq!(UserSettings::load_from(&path), UserSettings::default());

        std::fs::write(&path, "load_on_startup = false").unwrap();
        let partial = UserSettings::load_from(&path);
        assert!(!partial.load_on_startup);
        assert_eq!(partial.theme, ThemeVariant::Dark);
    }
}
