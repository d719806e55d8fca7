//! Pagination module
//!
//! Page-by-page loading of the picture feed.
//!
//! # Overview
//!
//! A [`FeedPaginator`] owns the cursor and exhaustion state of one feed. It
//! asks a [`PageSource`] for pages and hands every item to a [`Renderer`].
//! An epoch runs from one `reset` to the next; within it the cursor only
//! moves forward, and the first short or failed page ends it.

mod paginator;
mod source;
mod types;

pub use paginator::FeedPaginator;
pub use source::HttpPageSource;
pub use types::{
    LoadOutcome, PageRequest, PageSource, PaginatorConfig, PaginatorState, Renderer, SkipReason,
};
