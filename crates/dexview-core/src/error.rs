//! Error types for catalogue operations.

use thiserror::Error;

use crate::item::ItemId;

/// Errors raised by the catalogue, search and navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// Identifier is not present in the catalogue.
    #[error("Item not found: {id}")]
    NotFound { id: ItemId },

    /// Focused identifier is not part of the list being navigated.
    #[error("Item {id} is not in the active list")]
    NotInList { id: ItemId },

    /// Navigation was requested with nothing focused.
    #[error("No item is focused")]
    NoFocus,

    /// A batch listed an identifier without supplying its detail record.
    #[error("Batch is missing the detail record for {id}")]
    MissingDetail { id: ItemId },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CatalogueError {
    /// Create a not-found error for an identifier.
    pub fn not_found(id: impl Into<ItemId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a not-in-list error for an identifier.
    pub fn not_in_list(id: impl Into<ItemId>) -> Self {
        Self::NotInList { id: id.into() }
    }
}
