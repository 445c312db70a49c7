//! Catalogue configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Items requested per page by default.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on loadable items by default (the first generation).
pub const DEFAULT_MAX_ITEMS: usize = 151;

/// Shortest query that activates the search filter.
pub const MIN_QUERY_LEN: usize = 3;

/// Configuration for catalogue paging and search.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CatalogueConfig {
    /// Number of items requested per page.
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum number of items the session will load.
    #[builder(default = "DEFAULT_MAX_ITEMS")]
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Minimum trimmed query length before filtering kicks in.
    #[builder(default = "MIN_QUERY_LEN")]
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_min_query_len() -> usize {
    MIN_QUERY_LEN
}

impl CatalogueConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == Some(0) {
            return Err("Page size must be greater than zero".to_string());
        }
        if self.max_items == Some(0) {
            return Err("Maximum item count must be greater than zero".to_string());
        }
        if self.min_query_len == Some(0) {
            return Err("Minimum query length must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl CatalogueConfig {
    /// Create a new config builder.
    pub fn builder() -> CatalogueConfigBuilder {
        CatalogueConfigBuilder::default()
    }

    /// Size of the next page given how many items are already loaded.
    pub fn next_page_len(&self, loaded: usize) -> usize {
        self.page_size.min(self.max_items.saturating_sub(loaded))
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_items: DEFAULT_MAX_ITEMS,
            min_query_len: MIN_QUERY_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = CatalogueConfig::builder()
            .page_size(50usize)
            .max_items(386usize)
            .build()
            .unwrap();

        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_items, 386);
        assert_eq!(config.min_query_len, MIN_QUERY_LEN);
    }

    #[test]
    fn test_config_builder_rejects_zero() {
        assert!(CatalogueConfig::builder().page_size(0usize).build().is_err());
        assert!(CatalogueConfig::builder().max_items(0usize).build().is_err());
        assert!(CatalogueConfig::builder().min_query_len(0usize).build().is_err());
    }

    #[test]
    fn test_next_page_len() {
        let config = CatalogueConfig::default();
        assert_eq!(config.next_page_len(0), 20);
        assert_eq!(config.next_page_len(140), 11);
        assert_eq!(config.next_page_len(151), 0);
        assert_eq!(config.next_page_len(200), 0);
    }
}
