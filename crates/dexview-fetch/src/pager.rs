//! Incremental page loading with an upper bound.

use dexview_core::{
    CatalogueBatch, CatalogueConfig, CatalogueError, CatalogueStore, Session,
};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetcher::BatchFetcher;
use crate::source::ItemSource;

/// Offset and size of the next page, computed from the loaded count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

/// Lifecycle of a [`PaginationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// More pages may be requested.
    #[default]
    Idle,
    /// The bound was reached or the source ran dry.
    Exhausted,
}

/// Result of a completed load call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A batch was appended.
    Loaded {
        /// Items in the batch.
        added: usize,
        /// Items loaded in total afterwards.
        loaded: usize,
    },
    /// Nothing was requested because the controller is exhausted.
    Exhausted,
}

/// Something a fetched batch can be appended to.
pub trait BatchTarget {
    /// Append a batch atomically.
    fn append_batch(&mut self, batch: CatalogueBatch) -> Result<(), CatalogueError>;
}

impl BatchTarget for CatalogueStore {
    fn append_batch(&mut self, batch: CatalogueBatch) -> Result<(), CatalogueError> {
        self.append(batch)
    }
}

impl BatchTarget for Session {
    fn append_batch(&mut self, batch: CatalogueBatch) -> Result<(), CatalogueError> {
        self.append(batch).map(|_| ())
    }
}

/// Tracks how much of the catalogue has been loaded and what to ask for next.
///
/// Only one page may be pending at a time. [`Self::begin`] reserves the
/// slot and [`Self::finish`] releases it, committing the batch on success.
/// A failed page leaves the loaded count and the target untouched so the
/// same page is requested again on the next call.
#[derive(Debug, Clone)]
pub struct PaginationController {
    page_size: usize,
    max_items: usize,
    loaded: usize,
    state: PageState,
    pending: Option<PageRequest>,
}

impl PaginationController {
    /// Create a controller from catalogue settings.
    pub fn new(config: &CatalogueConfig) -> Self {
        Self {
            page_size: config.page_size,
            max_items: config.max_items,
            loaded: 0,
            state: PageState::Idle,
            pending: None,
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Check if no further pages will be requested.
    pub fn is_exhausted(&self) -> bool {
        self.state == PageState::Exhausted
    }

    /// Check if a page is pending.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The page that would be requested next, if any.
    pub fn next_request(&self) -> Option<PageRequest> {
        if self.is_exhausted() {
            return None;
        }
        let limit = self.page_size.min(self.max_items.saturating_sub(self.loaded));
        (limit > 0).then_some(PageRequest {
            offset: self.loaded,
            limit,
        })
    }

    /// Reserve the in-flight slot for the next page.
    ///
    /// Returns `Ok(None)` once exhausted.
    pub fn begin(&mut self) -> Result<Option<PageRequest>, FetchError> {
        if self.pending.is_some() {
            return Err(FetchError::InFlight);
        }
        match self.next_request() {
            Some(request) => {
                self.pending = Some(request);
                Ok(Some(request))
            }
            None => {
                self.state = PageState::Exhausted;
                Ok(None)
            }
        }
    }

    /// Release the in-flight slot without committing anything.
    ///
    /// Used when a fetch ends without a result. The same page is requested
    /// again on the next call.
    pub fn abandon(&mut self) -> Option<PageRequest> {
        self.pending.take()
    }

    /// Release the in-flight slot and commit a fetched batch.
    ///
    /// `request` must be the one returned by [`Self::begin`]; any other
    /// request is rejected and the slot stays reserved.
    pub fn finish<T: BatchTarget + ?Sized>(
        &mut self,
        request: PageRequest,
        result: Result<CatalogueBatch, FetchError>,
        target: &mut T,
    ) -> Result<LoadOutcome, FetchError> {
        if self.pending != Some(request) {
            warn!(offset = request.offset, limit = request.limit, "Finished page was not pending");
            return Err(FetchError::NotPending {
                offset: request.offset,
                limit: request.limit,
            });
        }
        self.pending = None;

        let batch = match result {
            Ok(batch) => batch,
            Err(err) => {
                warn!(offset = request.offset, error = %err, "Page load failed");
                return Err(err);
            }
        };

        let added = batch.len();
        if let Err(err) = target.append_batch(batch) {
            warn!(offset = request.offset, error = %err, "Batch rejected");
            return Err(err.into());
        }

        self.loaded += added;
        if self.loaded >= self.max_items || added < request.limit {
            self.state = PageState::Exhausted;
        }

        info!(
            added,
            loaded = self.loaded,
            exhausted = self.is_exhausted(),
            "Page loaded"
        );
        Ok(LoadOutcome::Loaded {
            added,
            loaded: self.loaded,
        })
    }

    /// Fetch and commit the next page.
    ///
    /// A no-op returning [`LoadOutcome::Exhausted`] once exhausted.
    pub async fn load_next<S, T>(
        &mut self,
        fetcher: &BatchFetcher<S>,
        target: &mut T,
    ) -> Result<LoadOutcome, FetchError>
    where
        S: ItemSource,
        T: BatchTarget + ?Sized,
    {
        let Some(request) = self.begin()? else {
            return Ok(LoadOutcome::Exhausted);
        };
        let result = fetcher.fetch(request).await;
        self.finish(request, result, target)
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(&CatalogueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_follow_loaded_count() {
        let mut pager = PaginationController::default();
        let mut store = CatalogueStore::new();

        let request = pager.begin().unwrap().unwrap();
        assert_eq!(request, PageRequest { offset: 0, limit: 20 });
        assert!(matches!(pager.begin(), Err(FetchError::InFlight)));

        pager
            .finish(request, Err(FetchError::network("u", "down")), &mut store)
            .unwrap_err();
        assert!(!pager.is_loading());
        assert_eq!(pager.next_request(), Some(PageRequest { offset: 0, limit: 20 }));
    }

    #[test]
    fn test_short_page_exhausts() {
        let config = CatalogueConfig::builder().page_size(5usize).build().unwrap();
        let mut pager = PaginationController::new(&config);
        let mut store = CatalogueStore::new();

        let request = pager.begin().unwrap().unwrap();
        let outcome = pager
            .finish(request, Ok(CatalogueBatch::new()), &mut store)
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { added: 0, loaded: 0 });
        assert!(pager.is_exhausted());
        assert_eq!(pager.begin().unwrap(), None);
    }

    #[test]
    fn test_rejected_batch_keeps_count() {
        let mut pager = PaginationController::default();
        let mut store = CatalogueStore::new();
        let mut batch = CatalogueBatch::new();
        batch.order.push("orphan".into());

        let request = pager.begin().unwrap().unwrap();
        let err = pager.finish(request, Ok(batch), &mut store).unwrap_err();
        assert!(matches!(err, FetchError::Catalogue(CatalogueError::MissingDetail { .. })));
        assert_eq!(pager.loaded(), 0);
        assert_eq!(pager.state(), PageState::Idle);
    }

    #[test]
    fn test_finish_rejects_unreserved_request() {
        let config = CatalogueConfig::builder().page_size(5usize).build().unwrap();
        let mut pager = PaginationController::new(&config);
        let mut store = CatalogueStore::new();

        let stale = PageRequest { offset: 0, limit: 20 };
        let err = pager.finish(stale, Ok(CatalogueBatch::new()), &mut store).unwrap_err();
        assert_eq!(err, FetchError::NotPending { offset: 0, limit: 20 });

        let request = pager.begin().unwrap().unwrap();
        assert!(pager.finish(stale, Ok(CatalogueBatch::new()), &mut store).is_err());
        assert!(pager.is_loading());
        assert!(!pager.is_exhausted());

        pager.finish(request, Ok(CatalogueBatch::new()), &mut store).unwrap();
        assert!(!pager.is_loading());
    }

    #[test]
    fn test_abandon_frees_slot() {
        let mut pager = PaginationController::default();

        let request = pager.begin().unwrap().unwrap();
        assert_eq!(pager.abandon(), Some(request));
        assert!(!pager.is_loading());
        assert_eq!(pager.begin().unwrap(), Some(request));
    }
}
