//! Posts, pages and cursors as returned by a content source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque continuation token identifying where the next page begins.
///
/// The core never inspects the contents; it only hands the token back
/// to the source on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(pub String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Audience interaction counts attached to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub reposts: u64,
    pub favorites: u64,
    pub replies: u64,
}

impl Engagement {
    pub fn new(reposts: u64, favorites: u64, replies: u64) -> Self {
        Self {
            reposts,
            favorites,
            replies,
        }
    }
}

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Gif,
}

/// A media attachment with a type tag and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    pub url: String,
}

impl MediaAttachment {
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Photo,
            url: url.into(),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
        }
    }
}

/// One post as fetched from the content source. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Source-assigned identifier, opaque and unique per source.
    pub id: String,

    /// UTF-8 post text.
    pub text: String,

    /// Author handle.
    pub author: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Engagement counts.
    pub metrics: Engagement,

    /// Hashtags in the order they appear.
    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Media attachments, if any.
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl Post {
    /// Create a post with empty metrics (builder style, mostly for tests).
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: String::new(),
            created_at: Utc::now(),
            metrics: Engagement::default(),
            hashtags: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Set the author handle.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set engagement metrics.
    pub fn with_metrics(mut self, metrics: Engagement) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the reply count only.
    pub fn with_replies(mut self, replies: u64) -> Self {
        self.metrics.replies = replies;
        self
    }

    /// Add a hashtag.
    pub fn with_hashtag(mut self, tag: impl Into<String>) -> Self {
        self.hashtags.push(tag.into());
        self
    }

    /// Add a media attachment.
    pub fn with_media(mut self, media: MediaAttachment) -> Self {
        self.media.push(media);
        self
    }

    /// URL of the first photo attachment, if any.
    pub fn first_photo_url(&self) -> Option<&str> {
        self.media
            .iter()
            .find(|m| m.kind == MediaKind::Photo)
            .map(|m| m.url.as_str())
    }
}

/// One page of posts plus the continuation token for the next page.
///
/// A missing token signals end of stream. Consumed once.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub posts: Vec<Post>,
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Create a page with posts and no continuation.
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            next_cursor: None,
        }
    }

    /// Set the continuation token.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(Cursor::new(cursor));
        self
    }

    /// An empty terminal page.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_photo_url_skips_video() {
        let post = Post::new("1", "text")
            .with_media(MediaAttachment::video("https://cdn.example/clip.mp4"))
            .with_media(MediaAttachment::photo("https://cdn.example/pic.jpg"));

        assert_eq!(post.first_photo_url(), Some("https://cdn.example/pic.jpg"));
    }

    #[test]
    fn test_first_photo_url_none_without_photos() {
        let post = Post::new("1", "text");
        assert_eq!(post.first_photo_url(), None);
    }

    #[test]
    fn test_page_cursor() {
        let page = Page::new(vec![Post::new("1", "a")]).with_cursor("abc");
        assert_eq!(page.next_cursor.as_ref().unwrap().as_str(), "abc");
        assert!(!page.is_empty());
        assert!(Page::empty().is_empty());
    }
}
