// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pepe-feed
//!
//! Incremental feed paginator for the pepe picture-sharing gallery.
//!
//! ## Features
//!
//! - **Infinite scroll**: load the next page when the viewport nears the end
//! - **Filters**: narrow the feed by author, superposable, date range or text
//! - **Epochs**: changing the filter resets the feed; late responses are dropped
//! - **Pluggable rendering**: any view implementing [`pagination::Renderer`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pepe_feed::{FeedConfig, FilterContext, Result};
//! use pepe_feed::pagination::{FeedPaginator, HttpPageSource, PaginatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = FeedConfig::from_file("feed.yaml")?;
//!     let source = HttpPageSource::from_feed(&config)?;
//!     let paginator = FeedPaginator::new(
//!         source,
//!         my_view,
//!         PaginatorConfig::from_feed(&config),
//!         FilterContext::new(),
//!     );
//!
//!     // First page
//!     paginator.load_next().await;
//!
//!     // On every scroll event
//!     paginator.on_scroll_proximity(scroll_bottom, feed_height).await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FeedPaginator                        │
//! │  reset(filter)   load_next()   on_scroll_proximity(..)    │
//! └───────────────────────────────────────────────────────────┘
//!              │                              │
//! ┌────────────┴────────────┐   ┌─────────────┴─────────────┐
//! │       PageSource        │   │         Renderer          │
//! ├─────────────────────────┤   ├───────────────────────────┤
//! │ HttpPageSource          │   │ render_item / clear_all   │
//! │  GET /pictures?index=.. │   │ set_empty_indicator       │
//! │  HttpClient (reqwest)   │   │ show_error                │
//! └─────────────────────────┘   └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Feed configuration
pub mod config;

/// Picture records
pub mod model;

/// Filter context
pub mod filter;

/// HTTP client
pub mod http;

/// Feed paginator
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FeedConfig;
pub use error::{Error, Result};
pub use filter::FilterContext;
pub use model::{Picture, Superposable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
