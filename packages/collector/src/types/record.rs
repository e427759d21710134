//! Flattened output records written to the CSV sinks.

use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::types::post::Post;

/// Sentinel written to the image column when a post has no photo.
pub const NO_IMAGE: &str = "N/A";

/// One classified post, flattened for the primary sink.
///
/// Append-only; never mutated or deleted after being written. `seq` is
/// strictly increasing and gap-free across resumed runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub seq: u64,
    pub text: String,
    pub reposts: u64,
    pub favorites: u64,
    pub replies: u64,
    pub image_url: String,
    pub category: Category,
}

impl PostRecord {
    /// Flatten a classified post into a record with the given sequence
    /// number.
    pub fn from_post(seq: u64, post: &Post, category: Category) -> Self {
        Self {
            seq,
            text: post.text.clone(),
            reposts: post.metrics.reposts,
            favorites: post.metrics.favorites,
            replies: post.metrics.replies,
            image_url: post
                .first_photo_url()
                .unwrap_or(NO_IMAGE)
                .to_string(),
            category,
        }
    }
}

/// One reply to a collected post, for the secondary sink.
///
/// Carries the parent's text and category alongside the reply's own
/// engagement. The reply's id never equals the parent's id (self-reply
/// exclusion happens upstream in the walker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub original_text: String,
    pub category: Category,
    pub reply_text: String,
    pub favorites: u64,
    pub reposts: u64,
}

impl ReplyRecord {
    /// Build a reply record from a parent post and one of its replies.
    pub fn from_reply(parent: &Post, category: Category, reply: &Post) -> Self {
        Self {
            original_text: parent.text.clone(),
            category,
            reply_text: reply.text.clone(),
            favorites: reply.metrics.favorites,
            reposts: reply.metrics.reposts,
        }
    }
}
