//! Fetching a listing page together with its detail records.

use std::sync::Arc;

use dexview_core::CatalogueBatch;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::FetchError;
use crate::pager::PageRequest;
use crate::progress::{FetchProgress, ProgressTracker};
use crate::source::ItemSource;

/// Fetches whole pages from a source and broadcasts progress.
pub struct BatchFetcher<S> {
    source: Arc<S>,
    progress_tx: broadcast::Sender<FetchProgress>,
}

impl<S> Clone for BatchFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            progress_tx: self.progress_tx.clone(),
        }
    }
}

impl<S: ItemSource> BatchFetcher<S> {
    /// Create a fetcher over a shared source.
    pub fn new(source: Arc<S>) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            source,
            progress_tx,
        }
    }

    /// Subscribe to fetch progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<FetchProgress> {
        self.progress_tx.subscribe()
    }

    /// Fetch one page and all of its detail records.
    pub async fn fetch(&self, request: PageRequest) -> Result<CatalogueBatch, FetchError> {
        fetch_batch(self.source.as_ref(), request, Some(&self.progress_tx)).await
    }
}

/// Fetch one page and its detail records into a batch.
///
/// Details are requested one at a time in listing order, so the batch order
/// is the listing order. The first failure aborts the whole batch. Rows past
/// `request.limit` are dropped.
pub async fn fetch_batch<S: ItemSource + ?Sized>(
    source: &S,
    request: PageRequest,
    progress: Option<&broadcast::Sender<FetchProgress>>,
) -> Result<CatalogueBatch, FetchError> {
    let mut entries = source.list_page(request.offset, request.limit).await?;
    entries.truncate(request.limit);
    debug!(
        offset = request.offset,
        limit = request.limit,
        rows = entries.len(),
        "Listing page received"
    );

    let mut tracker = ProgressTracker::new(request.offset, entries.len());
    if let Some(tx) = progress {
        let _ = tx.send(tracker.snapshot());
    }

    let mut batch = CatalogueBatch::new();
    for entry in &entries {
        let detail = source.item_detail(entry).await?;
        let expected = entry.id();
        if detail.id != expected {
            return Err(FetchError::malformed(
                entry.url.as_str(),
                format!("expected {expected}, got {}", detail.id),
            ));
        }
        tracker.record(expected);
        batch.push(detail);

        if let Some(tx) = progress {
            let _ = tx.send(tracker.snapshot());
        }
    }

    Ok(batch)
}
