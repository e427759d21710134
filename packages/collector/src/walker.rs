//! Pagination walker: drives the content source page by page.
//!
//! A small state machine (INITIAL → ADVANCING → EXHAUSTED) that waits
//! between pages, handles rate-limit signals in place with a bounded
//! iterative retry loop, and performs the single-page reply fetch for
//! a collected post's conversation.

use tracing::{debug, info, warn};

use crate::error::{SourceError, SourceResult};
use crate::pacing::Pacer;
use crate::traits::source::ContentSource;
use crate::types::post::{Cursor, Page, Post};

/// Walker state. A rate-limit signal never changes state: the same
/// request is retried after the reset wait.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WalkState {
    /// No page fetched yet; the next step is a fresh search.
    Initial,
    /// Mid-stream, holding the continuation token for the next page.
    Advancing(Cursor),
    /// End of stream. Terminal for this run.
    Exhausted,
}

/// One of the walker's three request shapes, retried as a unit under
/// rate limiting.
#[derive(Clone, Copy)]
enum Request<'a> {
    Search,
    Next(&'a Cursor),
    Replies(&'a str),
}

/// Drives a [`ContentSource`] through successive pages of one query.
pub struct PageWalker<'a, S: ContentSource> {
    source: &'a S,
    pacer: &'a Pacer,
    query: String,
    retry_ceiling: u32,
    state: WalkState,
}

impl<'a, S: ContentSource> PageWalker<'a, S> {
    pub fn new(source: &'a S, pacer: &'a Pacer, query: impl Into<String>, retry_ceiling: u32) -> Self {
        Self {
            source,
            pacer,
            query: query.into(),
            retry_ceiling,
            state: WalkState::Initial,
        }
    }

    /// Whether the stream has ended.
    pub fn is_exhausted(&self) -> bool {
        self.state == WalkState::Exhausted
    }

    /// Fetch the next page, or `None` once the source is exhausted.
    ///
    /// Between pages the walker sleeps a jittered per-page wait. An
    /// empty page, or a page without a continuation token, ends the
    /// walk (the latter after its posts are delivered).
    pub async fn next_page(&mut self) -> SourceResult<Option<Page>> {
        let page = match &self.state {
            WalkState::Exhausted => return Ok(None),
            WalkState::Initial => {
                info!(query = %self.query, "Starting search");
                self.fetch_with_retry(Request::Search).await?
            }
            WalkState::Advancing(cursor) => {
                let cursor = cursor.clone();
                let wait = self.pacer.page_wait();
                debug!(wait_secs = wait.as_secs(), "Waiting before next page");
                tokio::time::sleep(wait).await;
                self.fetch_with_retry(Request::Next(&cursor)).await?
            }
        };

        if page.is_empty() {
            info!("Source exhausted");
            self.state = WalkState::Exhausted;
            return Ok(None);
        }

        self.state = match &page.next_cursor {
            Some(cursor) => WalkState::Advancing(cursor.clone()),
            None => WalkState::Exhausted,
        };

        Ok(Some(page))
    }

    /// Fetch all replies in a post's conversation as one page,
    /// excluding the parent post itself.
    ///
    /// Single-page fetch with the same rate-limit handling as the
    /// page walk.
    pub async fn fetch_replies(&self, parent_id: &str) -> SourceResult<Vec<Post>> {
        let page = self.fetch_with_retry(Request::Replies(parent_id)).await?;
        Ok(page
            .posts
            .into_iter()
            .filter(|reply| reply.id != parent_id)
            .collect())
    }

    /// Issue one request, sleeping through rate-limit signals and
    /// retrying the identical request up to the retry ceiling.
    ///
    /// Iterative with an explicit attempt counter; exceeding the
    /// ceiling is fatal.
    async fn fetch_with_retry(&self, request: Request<'_>) -> SourceResult<Page> {
        let mut attempts: u32 = 0;
        loop {
            let result = match request {
                Request::Search => self.source.search(&self.query).await,
                Request::Next(cursor) => self.source.next_page(cursor).await,
                Request::Replies(parent_id) => self.source.replies(parent_id).await,
            };

            match result {
                Ok(page) => return Ok(page),
                Err(SourceError::RateLimited { reset_at }) => {
                    attempts += 1;
                    if attempts >= self.retry_ceiling {
                        return Err(SourceError::RetryCeiling { attempts });
                    }
                    let wait = self.pacer.reset_wait(reset_at);
                    warn!(
                        attempt = attempts,
                        wait_secs = wait.as_secs(),
                        "Rate limited, sleeping until reset"
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
