//! Error types for remote fetching and pagination.

use dexview_core::CatalogueError;
use thiserror::Error;

/// Errors raised while loading catalogue pages.
///
/// Any of these leaves the loaded catalogue untouched; the failed page can
/// be requested again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body did not have the expected shape.
    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    /// A page load is already pending on this controller.
    #[error("A page load is already in progress")]
    InFlight,

    /// A finished page did not match the page that was reserved.
    #[error("Page at offset {offset} (limit {limit}) was not pending")]
    NotPending { offset: usize, limit: usize },

    /// The fetched batch was rejected by the catalogue.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

impl FetchError {
    /// Create a network error from a transport failure.
    pub fn network(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Check if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::InFlight => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Malformed { .. } | Self::NotPending { .. } | Self::Catalogue(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::network("u", "reset").is_transient());
        assert!(FetchError::Status { url: "u".into(), status: 503 }.is_transient());
        assert!(!FetchError::Status { url: "u".into(), status: 404 }.is_transient());
        assert!(!FetchError::malformed("u", "eof").is_transient());
    }

    #[test]
    fn test_catalogue_error_is_transparent() {
        let err: FetchError = CatalogueError::not_found("mew").into();
        assert_eq!(err.to_string(), "Item not found: mew");
    }
}
