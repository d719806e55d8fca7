//! CLI commands and argument parsing

use crate::filter::FilterContext;
use crate::model::Superposable;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the pepe picture feed from the terminal
#[derive(Parser, Debug)]
#[command(name = "pepe-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Feed configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session cookie value
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through the feed until it is exhausted
    Browse {
        #[command(flatten)]
        filter: FilterArgs,

        /// Pictures per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Fetch a single page
    Page {
        /// Zero-based page index
        index: u32,

        #[command(flatten)]
        filter: FilterArgs,

        /// Pictures per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Validate the configuration
    Validate,

    /// Print the effective configuration
    ShowConfig,
}

/// Feed filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only pictures by this user
    #[arg(long)]
    pub username: Option<String>,

    /// Only pictures with this superposable
    #[arg(long, value_enum)]
    pub superposable: Option<Superposable>,

    /// Created at or after (RFC 3339)
    #[arg(long)]
    pub since: Option<DateTime<Utc>>,

    /// Created at or before (RFC 3339)
    #[arg(long)]
    pub until: Option<DateTime<Utc>>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Lay the flags over a base filter; flags win
    pub fn apply(&self, base: &FilterContext) -> FilterContext {
        FilterContext {
            username: self.username.clone().or_else(|| base.username.clone()),
            superposable: self.superposable.or(base.superposable),
            since: self.since.or(base.since),
            until: self.until.or(base.until),
            search: self.search.clone().or_else(|| base.search.clone()),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one picture per line)
    Json,
    /// Human-readable output
    Pretty,
}
