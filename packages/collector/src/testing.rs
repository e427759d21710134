//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without a live content source or
//! model backend. Mocks record their calls so tests can assert, for
//! example, that the lexicon strategy never touched the backend.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ClassifyError, ClassifyResult, SourceError, SourceResult};
use crate::traits::model::{LabelScore, ModelBackend, SentimentScores};
use crate::traits::source::ContentSource;
use crate::types::post::{Cursor, Page, Post};

/// Scripted content source.
///
/// Pages are queued in order: `search` delivers the first, each
/// `next_page` delivers the next. Rate limits and transient failures
/// can be injected ahead of any request.
#[derive(Default)]
pub struct MockSource {
    pages: Arc<RwLock<VecDeque<Page>>>,
    replies: Arc<RwLock<HashMap<String, Vec<Post>>>>,

    /// Requests left to deny with a rate-limit signal.
    rate_limits: Arc<AtomicU32>,
    rate_limit_reset: Arc<RwLock<Option<DateTime<Utc>>>>,

    /// Requests left to fail with a transient HTTP error.
    transient_errors: Arc<AtomicU32>,

    search_calls: Arc<AtomicU32>,
    next_page_calls: Arc<RwLock<Vec<String>>>,
    replies_calls: Arc<RwLock<Vec<String>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one page.
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().push_back(page);
        self
    }

    /// Queue several pages.
    pub fn with_pages(self, pages: impl IntoIterator<Item = Page>) -> Self {
        self.pages.write().unwrap().extend(pages);
        self
    }

    /// Deny the next `n` requests with a rate-limit signal carrying
    /// `reset_at`.
    pub fn with_rate_limits(self, n: u32, reset_at: DateTime<Utc>) -> Self {
        self.rate_limits.store(n, Ordering::SeqCst);
        *self.rate_limit_reset.write().unwrap() = Some(reset_at);
        self
    }

    /// Fail the next `n` requests with a transient HTTP error.
    pub fn with_transient_errors(self, n: u32) -> Self {
        self.transient_errors.store(n, Ordering::SeqCst);
        self
    }

    /// Set the replies returned for a parent id. The parent itself may
    /// be included to exercise self-reply exclusion.
    pub fn with_replies(self, parent_id: impl Into<String>, posts: Vec<Post>) -> Self {
        self.replies.write().unwrap().insert(parent_id.into(), posts);
        self
    }

    /// Number of `search` calls made.
    pub fn search_calls(&self) -> u32 {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Cursors passed to `next_page`, in order.
    pub fn next_page_calls(&self) -> Vec<String> {
        self.next_page_calls.read().unwrap().clone()
    }

    /// Parent ids passed to `replies`, in order.
    pub fn replies_calls(&self) -> Vec<String> {
        self.replies_calls.read().unwrap().clone()
    }

    fn check_injected_failures(&self) -> SourceResult<()> {
        let limits = self.rate_limits.load(Ordering::SeqCst);
        if limits > 0 {
            self.rate_limits.store(limits - 1, Ordering::SeqCst);
            let reset_at = self
                .rate_limit_reset
                .read()
                .unwrap()
                .unwrap_or_else(|| Utc::now() + chrono::Duration::seconds(1));
            return Err(SourceError::RateLimited { reset_at });
        }

        let transient = self.transient_errors.load(Ordering::SeqCst);
        if transient > 0 {
            self.transient_errors.store(transient - 1, Ordering::SeqCst);
            return Err(SourceError::Http(Box::new(std::io::Error::other(
                "injected transient failure",
            ))));
        }

        Ok(())
    }

    fn pop_page(&self) -> Page {
        self.pages.write().unwrap().pop_front().unwrap_or_default()
    }
}

impl Clone for MockSource {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            replies: Arc::clone(&self.replies),
            rate_limits: Arc::clone(&self.rate_limits),
            rate_limit_reset: Arc::clone(&self.rate_limit_reset),
            transient_errors: Arc::clone(&self.transient_errors),
            search_calls: Arc::clone(&self.search_calls),
            next_page_calls: Arc::clone(&self.next_page_calls),
            replies_calls: Arc::clone(&self.replies_calls),
        }
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn search(&self, _query: &str) -> SourceResult<Page> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_injected_failures()?;
        Ok(self.pop_page())
    }

    async fn next_page(&self, cursor: &Cursor) -> SourceResult<Page> {
        self.next_page_calls
            .write()
            .unwrap()
            .push(cursor.as_str().to_string());
        self.check_injected_failures()?;
        Ok(self.pop_page())
    }

    async fn replies(&self, parent_id: &str) -> SourceResult<Page> {
        self.replies_calls
            .write()
            .unwrap()
            .push(parent_id.to_string());
        self.check_injected_failures()?;
        let posts = self
            .replies
            .read()
            .unwrap()
            .get(parent_id)
            .cloned()
            .unwrap_or_default();
        Ok(Page::new(posts))
    }
}

/// Scripted model backend with call tracking.
#[derive(Default)]
pub struct MockModel {
    sentiments: Arc<RwLock<HashMap<String, SentimentScores>>>,
    default_sentiment: Arc<RwLock<Option<SentimentScores>>>,
    rankings: Arc<RwLock<HashMap<String, Vec<LabelScore>>>>,
    fail: Arc<AtomicU32>,

    sentiment_calls: Arc<AtomicU32>,
    rank_calls: Arc<AtomicU32>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentiment returned for any text without a specific override.
    pub fn with_default_sentiment(self, scores: SentimentScores) -> Self {
        *self.default_sentiment.write().unwrap() = Some(scores);
        self
    }

    /// Sentiment for one exact (normalized) text.
    pub fn with_sentiment(self, text: impl Into<String>, scores: SentimentScores) -> Self {
        self.sentiments.write().unwrap().insert(text.into(), scores);
        self
    }

    /// Label ranking for one exact text.
    pub fn with_ranking(self, text: impl Into<String>, ranking: Vec<LabelScore>) -> Self {
        self.rankings.write().unwrap().insert(text.into(), ranking);
        self
    }

    /// Make every call fail, simulating an unreachable backend.
    pub fn failing(self) -> Self {
        self.fail.store(u32::MAX, Ordering::SeqCst);
        self
    }

    /// Make the next `n` calls fail.
    pub fn failing_calls(self, n: u32) -> Self {
        self.fail.store(n, Ordering::SeqCst);
        self
    }

    pub fn sentiment_calls(&self) -> u32 {
        self.sentiment_calls.load(Ordering::SeqCst)
    }

    pub fn rank_calls(&self) -> u32 {
        self.rank_calls.load(Ordering::SeqCst)
    }

    fn maybe_fail(&self) -> ClassifyResult<()> {
        let remaining = self.fail.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != u32::MAX {
                self.fail.store(remaining - 1, Ordering::SeqCst);
            }
            return Err(ClassifyError::Backend(Box::new(std::io::Error::other(
                "injected backend failure",
            ))));
        }
        Ok(())
    }
}

impl Clone for MockModel {
    fn clone(&self) -> Self {
        Self {
            sentiments: Arc::clone(&self.sentiments),
            default_sentiment: Arc::clone(&self.default_sentiment),
            rankings: Arc::clone(&self.rankings),
            fail: Arc::clone(&self.fail),
            sentiment_calls: Arc::clone(&self.sentiment_calls),
            rank_calls: Arc::clone(&self.rank_calls),
        }
    }
}

#[async_trait]
impl ModelBackend for MockModel {
    async fn sentiment(&self, text: &str) -> ClassifyResult<SentimentScores> {
        self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        if let Some(scores) = self.sentiments.read().unwrap().get(text) {
            return Ok(*scores);
        }
        Ok(self
            .default_sentiment
            .read()
            .unwrap()
            .unwrap_or(SentimentScores::new(0.5, 0.5)))
    }

    async fn rank_labels(&self, text: &str, labels: &[&str]) -> ClassifyResult<Vec<LabelScore>> {
        self.rank_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        if let Some(ranking) = self.rankings.read().unwrap().get(text) {
            return Ok(ranking.clone());
        }
        // Default: uniform scores in the order given.
        Ok(labels
            .iter()
            .map(|l| LabelScore::new(*l, 1.0 / labels.len() as f64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_pages_in_order() {
        let source = MockSource::new()
            .with_page(Page::new(vec![Post::new("1", "a")]).with_cursor("c1"))
            .with_page(Page::new(vec![Post::new("2", "b")]));

        let first = source.search("q").await.unwrap();
        assert_eq!(first.posts[0].id, "1");

        let second = source.next_page(&Cursor::new("c1")).await.unwrap();
        assert_eq!(second.posts[0].id, "2");

        // Queue exhausted: empty page.
        assert!(source.next_page(&Cursor::new("c2")).await.unwrap().is_empty());
        assert_eq!(source.search_calls(), 1);
        assert_eq!(source.next_page_calls(), vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn test_mock_source_injects_rate_limit_once_per_request() {
        let reset = Utc::now() + chrono::Duration::seconds(10);
        let source = MockSource::new()
            .with_rate_limits(1, reset)
            .with_page(Page::new(vec![Post::new("1", "a")]));

        let err = source.search("q").await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited { reset_at } if reset_at == reset));

        assert!(source.search("q").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_model_overrides_and_defaults() {
        let model = MockModel::new()
            .with_default_sentiment(SentimentScores::new(0.9, 0.1))
            .with_sentiment("bad text", SentimentScores::new(0.1, 0.9));

        assert!(model.sentiment("anything").await.unwrap().is_positive());
        assert!(!model.sentiment("bad text").await.unwrap().is_positive());
        assert_eq!(model.sentiment_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_model_failing_calls_recover() {
        let model = MockModel::new().failing_calls(1);

        assert!(model.sentiment("x").await.is_err());
        assert!(model.sentiment("x").await.is_ok());
    }
}
