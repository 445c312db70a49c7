//! Remote catalogue loading for dexview.
//!
//! This crate connects the in-memory state of `dexview-core` to a paginated
//! backend.
//!
//! # Overview
//!
//! - **[`ItemSource`]** is the seam to the backend: a listing call and a
//!   per-item detail call.
//! - **[`PokeApiClient`]** implements it over HTTP with `reqwest`.
//! - **[`BatchFetcher`]** fetches a page and its details in listing order,
//!   broadcasting [`FetchProgress`] as records arrive.
//! - **[`PaginationController`]** decides which page comes next and commits
//!   fetched batches, allowing one page in flight at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dexview_core::{CatalogueConfig, Session};
//! use dexview_fetch::{BatchFetcher, ClientConfig, PaginationController, PokeApiClient};
//!
//! # async fn demo() -> Result<(), dexview_fetch::FetchError> {
//! let config = CatalogueConfig::default();
//! let client = PokeApiClient::new(ClientConfig::new())?;
//! let fetcher = BatchFetcher::new(Arc::new(client));
//! let mut pager = PaginationController::new(&config);
//! let mut session = Session::new(config);
//!
//! pager.load_next(&fetcher, &mut session).await?;
//! println!("Loaded {} items", session.store().len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod fetcher;
mod pager;
mod progress;
mod source;
pub mod wire;

pub use client::{ClientConfig, PokeApiClient, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
pub use error::FetchError;
pub use fetcher::{fetch_batch, BatchFetcher};
pub use pager::{BatchTarget, LoadOutcome, PageRequest, PageState, PaginationController};
pub use progress::FetchProgress;
pub use source::{ItemSource, ListEntry, MemorySource};
