//! HTTP content source over a JSON search API.
//!
//! Speaks a small REST surface: `GET /search` for fresh queries and
//! cursor continuation, `GET /conversation/{id}` for replies. Status
//! codes map onto [`SourceError`]: 401/403 are fatal auth failures,
//! 429 carries the reset timestamp, everything else non-2xx is a
//! transient HTTP error.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{SourceError, SourceResult};
use crate::traits::ContentSource;
use crate::types::post::{Cursor, MediaAttachment, MediaKind, Page, Post};

/// Header carrying the unix timestamp at which a 429 rate window resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Fallback wait when a 429 arrives without a reset header.
const DEFAULT_RESET_SECS: i64 = 60;

/// Content source backed by a bearer-authenticated JSON search API.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn get_page(&self, url: &str, params: &[(&str, &str)]) -> SourceResult<Page> {
        let resp = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Auth { reason: body });
        }
        if status.as_u16() == 429 {
            let reset_at = parse_reset(resp.headers().get(RATE_LIMIT_RESET_HEADER));
            return Err(SourceError::RateLimited { reset_at });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Http(
                format!("status {}: {}", status.as_u16(), body).into(),
            ));
        }

        let wire: WirePage = resp
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn search(&self, query: &str) -> SourceResult<Page> {
        let url = format!("{}/search", self.base_url);
        self.get_page(&url, &[("q", query)]).await
    }

    async fn next_page(&self, cursor: &Cursor) -> SourceResult<Page> {
        let url = format!("{}/search", self.base_url);
        self.get_page(&url, &[("cursor", cursor.as_str())]).await
    }

    async fn replies(&self, parent_id: &str) -> SourceResult<Page> {
        let url = format!("{}/conversation/{}", self.base_url, parent_id);
        self.get_page(&url, &[]).await
    }
}

/// Reset timestamps arrive as unix epoch seconds. A missing or
/// unparseable header falls back to a short fixed wait.
fn parse_reset(header: Option<&reqwest::header::HeaderValue>) -> DateTime<Utc> {
    header
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(|| Utc::now() + chrono::Duration::seconds(DEFAULT_RESET_SECS))
}

#[derive(Debug, Deserialize)]
struct WirePage {
    #[serde(default)]
    posts: Vec<WirePost>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WirePost {
    id: String,
    text: String,
    #[serde(default)]
    author: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    repost_count: u64,
    #[serde(default)]
    favorite_count: u64,
    #[serde(default)]
    reply_count: u64,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    media: Vec<WireMedia>,
}

#[derive(Debug, Deserialize)]
struct WireMedia {
    #[serde(rename = "type")]
    kind: String,
    url: String,
}

impl From<WirePage> for Page {
    fn from(wire: WirePage) -> Self {
        Page {
            posts: wire.posts.into_iter().map(Post::from).collect(),
            next_cursor: wire.next_cursor.map(Cursor::new),
        }
    }
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        Post {
            id: wire.id,
            text: wire.text,
            author: wire.author,
            created_at: wire.created_at,
            metrics: crate::types::post::Engagement::new(
                wire.repost_count,
                wire.favorite_count,
                wire.reply_count,
            ),
            hashtags: wire.hashtags,
            media: wire
                .media
                .into_iter()
                .filter_map(|m| {
                    let kind = match m.kind.as_str() {
                        "photo" => MediaKind::Photo,
                        "video" => MediaKind::Video,
                        "animated_gif" | "gif" => MediaKind::Gif,
                        // Unknown media kinds are dropped, not errors.
                        _ => return None,
                    };
                    Some(MediaAttachment { kind, url: m.url })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_page_maps_posts_and_cursor() {
        let json = r#"{
            "posts": [
                {
                    "id": "42",
                    "text": "lunch today",
                    "author": "ada",
                    "created_at": "2024-03-01T12:00:00Z",
                    "repost_count": 3,
                    "favorite_count": 10,
                    "reply_count": 6,
                    "hashtags": ["lunch"],
                    "media": [
                        {"type": "photo", "url": "https://cdn.example/a.jpg"},
                        {"type": "hologram", "url": "https://cdn.example/b.xyz"}
                    ]
                }
            ],
            "next_cursor": "abc123"
        }"#;

        let wire: WirePage = serde_json::from_str(json).unwrap();
        let page: Page = wire.into();

        assert_eq!(page.posts.len(), 1);
        let post = &page.posts[0];
        assert_eq!(post.id, "42");
        assert_eq!(post.metrics.replies, 6);
        assert_eq!(post.hashtags, vec!["lunch".to_string()]);
        // Unknown media kind is dropped; the photo survives.
        assert_eq!(post.media.len(), 1);
        assert_eq!(post.first_photo_url(), Some("https://cdn.example/a.jpg"));
        assert_eq!(page.next_cursor.as_ref().unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_wire_page_defaults() {
        let wire: WirePage = serde_json::from_str("{}").unwrap();
        let page: Page = wire.into();
        assert!(page.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_parse_reset_epoch_seconds() {
        let value = reqwest::header::HeaderValue::from_static("1700000000");
        let at = parse_reset(Some(&value));
        assert_eq!(at, Utc.timestamp_opt(1_700_000_000, 0).single().unwrap());
    }

    #[test]
    fn test_parse_reset_missing_header_falls_back() {
        let before = Utc::now();
        let at = parse_reset(None);
        assert!(at > before);
        assert!(at <= before + chrono::Duration::seconds(DEFAULT_RESET_SECS + 5));
    }
}
