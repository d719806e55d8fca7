//! Pagination types and traits
//!
//! Defines the seams of the feed paginator: where pages come from
//! ([`PageSource`]) and where items go ([`Renderer`]).

use crate::config::{FeedConfig, DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD};
use crate::error::{Error, Result};
use crate::filter::FilterContext;
use async_trait::async_trait;

/// One page request against the collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index (`index` query parameter)
    pub cursor: u32,
    /// Items per page (`count` query parameter)
    pub page_size: u32,
    /// Filter of the epoch that issued the request
    pub filter: FilterContext,
}

impl PageRequest {
    /// Query pairs in wire order: index, count, then the filter
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("index".to_string(), self.cursor.to_string()),
            ("count".to_string(), self.page_size.to_string()),
        ];
        params.extend(self.filter.to_query());
        params
    }
}

/// Paginator tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginatorConfig {
    /// Items requested per page
    pub page_size: u32,
    /// Scroll ratio that triggers the next page
    pub scroll_threshold: f64,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl PaginatorConfig {
    /// Create a config with the given page size and the default threshold
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Set the scroll threshold
    #[must_use]
    pub fn scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    /// Take page size and threshold from a feed configuration
    pub fn from_feed(feed: &FeedConfig) -> Self {
        Self {
            page_size: feed.page_size,
            scroll_threshold: feed.scroll_threshold,
        }
    }
}

/// Snapshot of the paginator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginatorState {
    /// Last requested page; `None` until the first request of the epoch
    pub cursor: Option<u32>,
    /// No more pages will be requested until the next reset
    pub exhausted: bool,
    /// A page request is in flight
    pub pending: bool,
    /// Incremented on every reset
    pub epoch: u64,
}

impl PaginatorState {
    /// Cursor of the next request, `None` once the cursor space is used up
    pub fn next_cursor(&self) -> Option<u32> {
        match self.cursor {
            None => Some(0),
            Some(c) => c.checked_add(1),
        }
    }
}

/// Why `load_next` did not issue a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The epoch is exhausted
    Exhausted,
    /// Another request of this paginator is still pending
    InFlight,
    /// The scroll position is not close enough to the end
    BelowThreshold,
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No request was issued
    Skipped(SkipReason),
    /// A page was rendered
    Page {
        cursor: u32,
        count: usize,
        /// The page was short and ended the epoch
        exhausted: bool,
    },
    /// The first page of the epoch came back empty
    Empty,
    /// The request failed; the epoch is exhausted
    Failed { cursor: u32, message: String },
    /// The response belonged to a superseded epoch and was dropped
    Stale { epoch: u64 },
}

impl LoadOutcome {
    /// Whether a network request was made for this outcome
    pub fn fetched(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// Where pages come from
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type of the collection
    type Item: Send;

    /// Fetch one page. An empty vector means the end of the feed.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Self::Item>>;
}

/// Where items go
///
/// Implemented by the view that owns the feed.
pub trait Renderer<T>: Send {
    /// Handle to a rendered item
    type Handle: Send;

    /// Append one item
    fn render_item(&mut self, item: T) -> Self::Handle;

    /// Remove everything rendered so far
    fn clear_all(&mut self);

    /// Show or hide the "nothing here" indicator
    fn set_empty_indicator(&mut self, empty: bool);

    /// Surface a failed page load to the user
    fn show_error(&mut self, _error: &Error) {}
}
