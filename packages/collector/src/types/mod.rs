//! Data types for the collection pipeline.

pub mod config;
pub mod post;
pub mod record;

pub use config::{CollectorConfig, PacingConfig, WaitRange};
pub use post::{Cursor, Engagement, MediaAttachment, MediaKind, Page, Post};
pub use record::{PostRecord, ReplyRecord, NO_IMAGE};
