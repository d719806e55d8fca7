//! The feed paginator
//!
//! Drives "load next page" requests for one scrollable feed. All operations
//! take `&self`: the state lock is released while a page is on the wire, so a
//! scroll event can re-enter [`FeedPaginator::load_next`] during a fetch.
//! Re-entrant calls are turned away by the pending flag, and responses from
//! an epoch that was reset in the meantime are dropped.

use super::types::{
    LoadOutcome, PageRequest, PageSource, PaginatorConfig, PaginatorState, Renderer, SkipReason,
};
use crate::error::Result;
use crate::filter::FilterContext;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

type Handle<S, R> = <R as Renderer<<S as PageSource>::Item>>::Handle;

struct Inner<R, H> {
    state: PaginatorState,
    filter: FilterContext,
    renderer: R,
    rendered: Vec<H>,
}

/// Incremental paginator over a remote collection
pub struct FeedPaginator<S, R>
where
    S: PageSource,
    R: Renderer<S::Item>,
{
    source: S,
    config: PaginatorConfig,
    inner: Mutex<Inner<R, Handle<S, R>>>,
}

impl<S, R> FeedPaginator<S, R>
where
    S: PageSource,
    R: Renderer<S::Item>,
{
    /// Create an idle paginator. Nothing is fetched until the first
    /// `load_next`, `on_scroll_proximity` or `reset`.
    pub fn new(source: S, renderer: R, config: PaginatorConfig, filter: FilterContext) -> Self {
        Self {
            source,
            config,
            inner: Mutex::new(Inner {
                state: PaginatorState::default(),
                filter,
                renderer,
                rendered: Vec::new(),
            }),
        }
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> PaginatorState {
        self.inner.lock().await.state
    }

    pub async fn is_exhausted(&self) -> bool {
        self.inner.lock().await.state.exhausted
    }

    /// Filter of the current epoch
    pub async fn filter(&self) -> FilterContext {
        self.inner.lock().await.filter.clone()
    }

    /// Number of items rendered in the current epoch
    pub async fn rendered_count(&self) -> usize {
        self.inner.lock().await.rendered.len()
    }

    /// Tear down, handing back the source and renderer
    pub fn into_parts(self) -> (S, R) {
        (self.source, self.inner.into_inner().renderer)
    }

    /// Start a new epoch with `filter` and load its first page.
    ///
    /// The render target is cleared, the cursor goes back to "not requested"
    /// and the exhausted flag is lifted. A request still pending from the
    /// previous epoch is left to finish; its response is discarded.
    pub async fn reset(&self, filter: FilterContext) -> LoadOutcome {
        {
            let mut inner = self.inner.lock().await;
            let epoch = inner.state.epoch + 1;
            inner.state = PaginatorState {
                epoch,
                ..PaginatorState::default()
            };
            inner.filter = filter;
            inner.rendered.clear();
            inner.renderer.clear_all();
            inner.renderer.set_empty_indicator(false);
            info!(epoch, "Feed reset");
        }

        self.load_next().await
    }

    /// Request the page after the current cursor.
    ///
    /// Does nothing once the epoch is exhausted or while another request is
    /// pending. Failures exhaust the epoch and are reported to the renderer;
    /// they are never retried.
    pub async fn load_next(&self) -> LoadOutcome {
        let (epoch, request) = match self.begin().await {
            Ok(started) => started,
            Err(reason) => {
                debug!(?reason, "Skipping page load");
                return LoadOutcome::Skipped(reason);
            }
        };

        let result = self.source.fetch_page(&request).await;
        self.complete(epoch, request.cursor, result).await
    }

    /// Load the next page when the viewport has scrolled far enough.
    ///
    /// `scroll_top` is the distance from the top of the feed to the bottom
    /// of the viewport; `scroll_height` is the full height of the feed.
    pub async fn on_scroll_proximity(&self, scroll_top: f64, scroll_height: f64) -> LoadOutcome {
        if self.is_exhausted().await {
            return LoadOutcome::Skipped(SkipReason::Exhausted);
        }

        // NaN positions never cross the threshold
        let crossed = scroll_top >= scroll_height * self.config.scroll_threshold;
        if !crossed {
            return LoadOutcome::Skipped(SkipReason::BelowThreshold);
        }

        self.load_next().await
    }

    /// Claim the next cursor, or say why not
    async fn begin(&self) -> std::result::Result<(u64, PageRequest), SkipReason> {
        let mut inner = self.inner.lock().await;

        if inner.state.exhausted {
            return Err(SkipReason::Exhausted);
        }
        if inner.state.pending {
            return Err(SkipReason::InFlight);
        }

        let Some(cursor) = inner.state.next_cursor() else {
            inner.state.exhausted = true;
            return Err(SkipReason::Exhausted);
        };
        inner.state.cursor = Some(cursor);
        inner.state.pending = true;

        debug!(cursor, epoch = inner.state.epoch, "Requesting page");
        Ok((
            inner.state.epoch,
            PageRequest {
                cursor,
                page_size: self.config.page_size,
                filter: inner.filter.clone(),
            },
        ))
    }

    /// Apply a fetch result to the epoch that issued it
    async fn complete(
        &self,
        epoch: u64,
        cursor: u32,
        result: Result<Vec<S::Item>>,
    ) -> LoadOutcome {
        let mut inner = self.inner.lock().await;

        if inner.state.epoch != epoch {
            debug!(
                stale_epoch = epoch,
                current_epoch = inner.state.epoch,
                "Dropping response from a previous epoch"
            );
            return LoadOutcome::Stale { epoch };
        }

        inner.state.pending = false;

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                inner.state.exhausted = true;
                error!(cursor, "Failed to load page: {}", e);
                inner.renderer.show_error(&e);
                return LoadOutcome::Failed {
                    cursor,
                    message: e.alert_text(),
                };
            }
        };

        let count = items.len();
        for item in items {
            let handle = inner.renderer.render_item(item);
            inner.rendered.push(handle);
        }

        if count == 0 && cursor == 0 {
            inner.state.exhausted = true;
            inner.renderer.set_empty_indicator(true);
            info!("Feed is empty");
            return LoadOutcome::Empty;
        }

        let exhausted = count < self.config.page_size as usize;
        if exhausted {
            inner.state.exhausted = true;
            info!(cursor, count, "Reached the end of the feed");
        }

        LoadOutcome::Page {
            cursor,
            count,
            exhausted,
        }
    }
}

impl<S, R> std::fmt::Debug for FeedPaginator<S, R>
where
    S: PageSource,
    R: Renderer<S::Item>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedPaginator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
