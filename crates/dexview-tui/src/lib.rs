//! Terminal user interface for dexview.
//!
//! This crate provides an interactive TUI for browsing the creature
//! catalogue, built with ratatui.
//!
//! # Overview
//!
//! - **Card grid** - Loaded items as cards coloured by primary type
//! - **Search bar** - Live substring filter over the loaded catalogue
//! - **Detail view** - Main facts and a stats chart, with wrap-around
//!   previous/next navigation over the active list
//!
//! Pages are fetched in the background, so the grid stays usable while the
//! next batch loads.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dexview_tui::TuiConfig;
//!
//! let config = TuiConfig::new().with_max_items(151);
//! dexview_tui::run_with_config(config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `h`/`j`/`k`/`l` or arrows - Move between cards
//! - `Enter` - Open the detail view
//! - `←`/`→` - Previous/next item in the detail view
//! - `Tab` - Switch detail tab
//! - `/` - Search
//! - `m` - Load more
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod search;
mod theme;
mod ui;

use std::sync::Arc;

use color_eyre::eyre::WrapErr;

use dexview_core::CatalogueConfig;
use dexview_fetch::{ClientConfig, PokeApiClient};

pub use app::{App, AppResult, UserSettings};
pub use theme::{Theme, ThemeVariant};

/// Options passed from the command line.
///
/// Unset values fall back to the user settings file, then to defaults.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    page_size: Option<usize>,
    max_items: Option<usize>,
    api_base: Option<String>,
    load_on_startup: Option<bool>,
    theme: Option<ThemeVariant>,
}

impl TuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_items(mut self, max_items: impl Into<Option<usize>>) -> Self {
        self.max_items = max_items.into();
        self
    }

    /// Use a different API root, e.g. a local mirror.
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_load_on_startup(mut self, load: Option<bool>) -> Self {
        self.load_on_startup = load;
        self
    }

    pub fn with_theme(mut self, theme: Option<ThemeVariant>) -> Self {
        self.theme = theme;
        self
    }

    /// Override the stored settings with the options that were given.
    pub fn apply_to(&self, settings: &mut UserSettings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(load) = self.load_on_startup {
            settings.load_on_startup = load;
        }
    }

    /// Merge with user settings into the catalogue configuration.
    pub fn catalogue_config(&self, settings: &UserSettings) -> AppResult<CatalogueConfig> {
        let mut builder = CatalogueConfig::builder();
        if let Some(page_size) = self.page_size.or(settings.page_size) {
            builder.page_size(page_size);
        }
        if let Some(max_items) = self.max_items.or(settings.max_items) {
            builder.max_items(max_items);
        }
        builder.build().wrap_err("Invalid catalogue settings")
    }

    /// Merge with user settings into the HTTP client configuration.
    pub fn client_config(&self, settings: &UserSettings) -> ClientConfig {
        match self.api_base.as_ref().or(settings.api_base.as_ref()) {
            Some(base) => ClientConfig::new().with_api_base(base.as_str()),
            None => ClientConfig::new(),
        }
    }
}

/// Run the TUI application with default config.
pub fn run() -> AppResult<()> {
    run_with_config(TuiConfig::default())
}

/// Run the TUI application with custom config.
pub fn run_with_config(config: TuiConfig) -> AppResult<()> {
    let mut settings = UserSettings::load();
    config.apply_to(&mut settings);

    let catalogue = config.catalogue_config(&settings)?;
    let client = PokeApiClient::new(config.client_config(&settings))
        .wrap_err("Failed to build HTTP client")?;

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let app = App::new(Arc::new(client), catalogue, settings)
        .with_settings_path(UserSettings::config_path());

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let settings = UserSettings {
            page_size: Some(30),
            max_items: Some(90),
            api_base: Some("http://mirror.local/api/v2".to_string()),
            ..Default::default()
        };

        let config = TuiConfig::new().with_page_size(Some(10));
        let catalogue = config.catalogue_config(&settings).unwrap();
        assert_eq!(catalogue.page_size, 10);
        assert_eq!(catalogue.max_items, 90);
        assert_eq!(
            config.client_config(&settings).api_base,
            "http://mirror.local/api/v2"
        );

        let defaults = TuiConfig::new().catalogue_config(&UserSettings::default()).unwrap();
        assert_eq!(defaults, CatalogueConfig::default());
    }

    #[test]
    fn test_theme_and_startup_override_settings() {
        let mut settings = UserSettings::default();
        TuiConfig::new().apply_to(&mut settings);
        assert_eq!(settings.theme, ThemeVariant::Dark);
        assert!(settings.load_on_startup);

        TuiConfig::new()
            .with_theme(Some(ThemeVariant::Light))
            .with_load_on_startup(Some(false))
            .apply_to(&mut settings);
        assert_eq!(settings.theme, ThemeVariant::Light);
        assert!(!settings.load_on_startup);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = TuiConfig::new().with_page_size(Some(0));
        assert!(config.catalogue_config(&UserSettings::default()).is_err());
    }
}
