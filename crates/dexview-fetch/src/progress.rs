//! Batch fetch progress reporting.

use std::time::{Duration, Instant};

use dexview_core::ItemId;

/// Progress information while a page is being fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchProgress {
    /// Offset of the page being fetched.
    pub offset: usize,
    /// Detail records fetched so far in this page.
    pub fetched: usize,
    /// Detail records expected for this page.
    pub total: usize,
    /// Identifier fetched most recently.
    pub current: Option<ItemId>,
    /// Time elapsed since the page request started.
    pub elapsed: Duration,
}

impl FetchProgress {
    /// Create initial progress state for a page.
    pub fn new(offset: usize, total: usize) -> Self {
        Self {
            offset,
            fetched: 0,
            total,
            current: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Completed share of the page in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.fetched as f64 / self.total as f64).min(1.0)
        }
    }

    /// Check if every expected record has arrived.
    pub fn is_complete(&self) -> bool {
        self.fetched >= self.total
    }
}

impl Default for FetchProgress {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Running counter for one page.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    offset: usize,
    total: usize,
    fetched: usize,
    current: Option<ItemId>,
}

impl ProgressTracker {
    pub fn new(offset: usize, total: usize) -> Self {
        Self {
            start_time: Instant::now(),
            offset,
            total,
            fetched: 0,
            current: None,
        }
    }

    pub fn record(&mut self, id: ItemId) {
        self.fetched += 1;
        self.current = Some(id);
    }

    pub fn snapshot(&self) -> FetchProgress {
        FetchProgress {
            offset: self.offset,
            fetched: self.fetched,
            total: self.total,
            current: self.current.clone(),
            elapsed: self.start_time.elapsed(),
        }
    }
}
