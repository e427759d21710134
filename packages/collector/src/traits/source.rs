//! Content source trait: the paginated, rate-limited remote feed.
//!
//! The source authenticates, executes a search query, advances to the
//! next page given an opaque continuation token, and fetches reply
//! conversations. Rate limiting surfaces as
//! [`SourceError::RateLimited`](crate::error::SourceError::RateLimited)
//! carrying the reset timestamp; the walker owns the retry policy, the
//! source only reports.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::post::{Cursor, Page};

/// A paginated content source.
///
/// # Implementations
///
/// - `HttpSource` - reqwest client against a JSON search API
/// - `MockSource` (in [`crate::testing`]) - scripted pages for tests
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Execute a fresh search and return the first page.
    ///
    /// The query string is opaque to the core: OR-groups, language
    /// filters, date ranges and the like are the caller's business.
    async fn search(&self, query: &str) -> SourceResult<Page>;

    /// Fetch the page after the given continuation token.
    async fn next_page(&self, cursor: &Cursor) -> SourceResult<Page>;

    /// Fetch the replies in a post's conversation as a single page.
    async fn replies(&self, parent_id: &str) -> SourceResult<Page>;
}
