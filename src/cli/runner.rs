//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FilterArgs, OutputFormat};
use crate::cli::render::TerminalRenderer;
use crate::config::FeedConfig;
use crate::error::{Error, Result, ResultExt};
use crate::filter::FilterContext;
use crate::model::Picture;
use crate::pagination::{
    FeedPaginator, HttpPageSource, LoadOutcome, PageRequest, PageSource, PaginatorConfig,
    Renderer,
};
use std::io::{self, Stdout};
use tracing::info;

type TerminalPaginator = FeedPaginator<HttpPageSource<Picture>, TerminalRenderer<Stdout>>;

/// Totals of a browse session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrowseSummary {
    pub pages: u32,
    pub pictures: usize,
    pub failed: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Browse {
                filter,
                page_size,
                max_pages,
            } => {
                let summary = self.browse(filter, *page_size, *max_pages).await?;
                info!(
                    pages = summary.pages,
                    pictures = summary.pictures,
                    "Browse finished"
                );
                if summary.failed {
                    return Err(Error::Other("feed stopped on a failed page".to_string()));
                }
                Ok(())
            }
            Commands::Page {
                index,
                filter,
                page_size,
            } => self.page(*index, filter, *page_size).await,
            Commands::Validate => self.validate(),
            Commands::ShowConfig => self.show_config(),
        }
    }

    /// Effective configuration: file (or defaults) overlaid with global flags
    pub fn feed_config(&self) -> Result<FeedConfig> {
        let mut config = match &self.cli.config {
            Some(path) => FeedConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => FeedConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(session) = &self.cli.session {
            config.session_cookie = Some(session.clone());
        }

        config.validate()?;
        Ok(config)
    }

    async fn browse(
        &self,
        filter: &FilterArgs,
        page_size: Option<u32>,
        max_pages: Option<u32>,
    ) -> Result<BrowseSummary> {
        let config = self.with_page_size(self.feed_config()?, page_size)?;
        let filter = filter.apply(&config.filter);
        let paginator = self.build_paginator(&config, filter.clone())?;

        info!(
            "Browsing {}{} ({} per page)",
            config.base_url, config.endpoint, config.page_size
        );
        let outcome = paginator.reset(filter).await;
        Ok(drain(&paginator, outcome, max_pages).await)
    }

    async fn page(&self, index: u32, filter: &FilterArgs, page_size: Option<u32>) -> Result<()> {
        let config = self.with_page_size(self.feed_config()?, page_size)?;
        let source = HttpPageSource::<Picture>::from_feed(&config)?;
        let request = PageRequest {
            cursor: index,
            page_size: config.page_size,
            filter: filter.apply(&config.filter),
        };

        let pictures = source.fetch_page(&request).await?;
        let mut renderer = self.renderer(&config);
        if pictures.is_empty() {
            renderer.set_empty_indicator(true);
        }
        for picture in pictures {
            renderer.render_item(picture);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let config = self.feed_config()?;
        println!(
            "Configuration OK: {}{} ({} per page)",
            config.base_url, config.endpoint, config.page_size
        );
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        let config = self.feed_config()?;
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config)?,
            OutputFormat::Pretty => serde_yaml::to_string(&config)?,
        };
        println!("{rendered}");
        Ok(())
    }

    fn with_page_size(&self, mut config: FeedConfig, page_size: Option<u32>) -> Result<FeedConfig> {
        if let Some(size) = page_size {
            config.page_size = size;
            config.validate()?;
        }
        Ok(config)
    }

    fn renderer(&self, config: &FeedConfig) -> TerminalRenderer<Stdout> {
        TerminalRenderer::new(io::stdout(), self.cli.format).image_host(config.base_url.clone())
    }

    fn build_paginator(&self, config: &FeedConfig, filter: FilterContext) -> Result<TerminalPaginator> {
        let source = HttpPageSource::from_feed(config)?;
        Ok(FeedPaginator::new(
            source,
            self.renderer(config),
            PaginatorConfig::from_feed(config),
            filter,
        ))
    }
}

/// Keep loading until the feed is exhausted or `max_pages` pages were fetched.
///
/// `first` is the outcome of the load that started the epoch.
pub async fn drain<S, R>(
    paginator: &FeedPaginator<S, R>,
    first: LoadOutcome,
    max_pages: Option<u32>,
) -> BrowseSummary
where
    S: PageSource,
    R: Renderer<S::Item>,
{
    let mut summary = BrowseSummary::default();
    let mut outcome = first;

    loop {
        match &outcome {
            LoadOutcome::Page { count, .. } => {
                summary.pages += 1;
                summary.pictures += count;
            }
            LoadOutcome::Empty => summary.pages += 1,
            LoadOutcome::Failed { .. } => {
                summary.pages += 1;
                summary.failed = true;
            }
            LoadOutcome::Skipped(_) | LoadOutcome::Stale { .. } => return summary,
        }

        if max_pages.is_some_and(|max| summary.pages >= max) || paginator.is_exhausted().await {
            return summary;
        }

        outcome = paginator.load_next().await;
    }
}
