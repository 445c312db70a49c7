//! Core types and state for dexview.
//!
//! This crate holds the framework-independent part of the catalogue viewer:
//! the ordered item store, the substring search filter, the circular
//! previous/next resolver and the session object that ties them together.
//! Nothing here performs I/O.

mod catalogue;
mod config;
mod error;
mod item;
pub mod navigation;
pub mod search;
mod session;

pub use catalogue::{CatalogueBatch, CatalogueStore};
pub use config::{
    CatalogueConfig, CatalogueConfigBuilder, DEFAULT_MAX_ITEMS, DEFAULT_PAGE_SIZE, MIN_QUERY_LEN,
};
pub use error::CatalogueError;
pub use item::{format_ability, ItemDetail, ItemId, StatBlock, StatKind, STAT_LABELS};
pub use navigation::{Direction, Neighbors};
pub use search::FilterState;
pub use session::{Session, Snapshot};
