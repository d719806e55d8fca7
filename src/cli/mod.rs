//! CLI module
//!
//! Command-line interface for browsing the feed.
//!
//! # Commands
//!
//! - `browse` - Page through the feed until it is exhausted
//! - `page` - Fetch a single page
//! - `validate` - Validate the configuration
//! - `show-config` - Print the effective configuration

mod commands;
mod render;
mod runner;

pub use commands::{Cli, Commands, FilterArgs, OutputFormat};
pub use render::TerminalRenderer;
pub use runner::{drain, BrowseSummary, Runner};
