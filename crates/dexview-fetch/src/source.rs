//! The external data source seam.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use dexview_core::{ItemDetail, ItemId};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One row of a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Item name, used as its identifier.
    pub name: String,
    /// Where the item's detail record lives.
    pub url: String,
}

impl ListEntry {
    /// Identifier for this entry.
    pub fn id(&self) -> ItemId {
        ItemId::new(self.name.as_str())
    }
}

/// A paginated catalogue backend.
///
/// Both operations return `Send` futures so fetches can run on a spawned
/// task. Implementations may use `async fn`.
pub trait ItemSource: Send + Sync {
    /// Fetch up to `limit` listing rows starting at `offset`.
    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ListEntry>, FetchError>> + Send;

    /// Fetch the detail record for a listing row.
    fn item_detail(
        &self,
        entry: &ListEntry,
    ) -> impl Future<Output = Result<ItemDetail, FetchError>> + Send;
}

/// In-memory source over a fixed list of records.
///
/// Used for offline runs and tests. Individual requests can be made to fail.
#[derive(Debug, Default)]
pub struct MemorySource {
    items: Vec<ItemDetail>,
    failing: Mutex<HashSet<String>>,
    listing_down: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Create a source serving `items` in order.
    pub fn new(items: Vec<ItemDetail>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Make the detail request for `name` fail until [`Self::heal`] is called.
    pub fn fail_on(&self, name: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(name.to_string());
        }
    }

    /// Make every listing request fail until [`Self::heal`] is called.
    pub fn fail_listing(&self) {
        self.listing_down.store(true, Ordering::SeqCst);
    }

    /// Stop failing every request.
    pub fn heal(&self) {
        self.listing_down.store(false, Ordering::SeqCst);
        if let Ok(mut failing) = self.failing.lock() {
            failing.clear();
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of records served.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the source has no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn record(&self, url: &str) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
    }

    fn is_failing(&self, name: &str) -> bool {
        self.failing
            .lock()
            .map(|f| f.contains(name))
            .unwrap_or(false)
    }
}

impl ItemSource for MemorySource {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<ListEntry>, FetchError> {
        let url = format!("memory://list?limit={limit}&offset={offset}");
        self.record(&url);
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(FetchError::network(url, "listing unavailable"));
        }

        Ok(self
            .items
            .iter()
            .skip(offset)
            .take(limit)
            .map(|d| ListEntry {
                name: d.id.to_string(),
                url: format!("memory://item/{}", d.id),
            })
            .collect())
    }

    async fn item_detail(&self, entry: &ListEntry) -> Result<ItemDetail, FetchError> {
        self.record(&entry.url);
        if self.is_failing(&entry.name) {
            return Err(FetchError::Status {
                url: entry.url.clone(),
                status: 503,
            });
        }

        self.items
            .iter()
            .find(|d| d.id.as_str() == entry.name)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: entry.url.clone(),
                status: 404,
            })
    }
}
