//! Rate-Adaptive Social Post Collection Library
//!
//! Collects posts from a paginated, rate-limited content source,
//! filters them by engagement, classifies each post's text into a
//! small category set, and appends results to durable, resumable
//! output.
//!
//! # Design
//!
//! - Cooperative single-task pipeline: fetch → filter → classify →
//!   persist → wait, with every wait an explicit suspension point
//! - Adaptive pacing: jittered waits between posts, pages and
//!   sessions, plus computed sleeps on rate-limit reset signals
//! - Pluggable classification: lexicon, sentiment-comparison and
//!   zero-shot strategies behind one trait
//! - Resume-by-count: progress is recovered from the sink's row
//!   count, not from checkpoint files
//!
//! # Usage
//!
//! ```rust,ignore
//! use collector::{collect, CollectorConfig, CsvSink, LexiconClassifier};
//!
//! let config = CollectorConfig::new(query).with_target(1000);
//! let sink = CsvSink::open("posts.csv", "replies.csv")?;
//! let classifier = LexiconClassifier::new(backend);
//!
//! let result = collect(&config, &source, &classifier, &sink).await?;
//! println!("collected {}", result.collected);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ContentSource, ModelBackend, RecordSink)
//! - [`types`] - Posts, pages, records and configuration
//! - [`classify`] - Category set and classification strategies
//! - [`pacing`] - Jittered backoff pacer
//! - [`walker`] - Pagination and reply walkers
//! - [`pipeline`] - The resumable collection loop
//! - [`sources`] - Content source implementations (HttpSource)
//! - [`models`] - Model backend implementations (InferenceBackend)
//! - [`sinks`] - Sink implementations (CsvSink, MemorySink)
//! - [`testing`] - Mock implementations for testing

pub mod classify;
pub mod error;
pub mod filter;
pub mod models;
pub mod pacing;
pub mod pipeline;
pub mod sinks;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;
pub mod walker;

// Re-export core types at crate root
pub use error::{
    ClassifyError, CollectorError, ConfigError, Result, SinkError, SourceError,
};
pub use traits::{
    model::{LabelScore, ModelBackend, SentimentScores},
    sink::RecordSink,
    source::ContentSource,
};
pub use types::{
    config::{CollectorConfig, PacingConfig, WaitRange},
    post::{Cursor, Engagement, MediaAttachment, MediaKind, Page, Post},
    record::{PostRecord, ReplyRecord, NO_IMAGE},
};

pub use classify::{
    Category, Classifier, LexiconClassifier, SentimentClassifier, ZeroShotClassifier,
};
pub use filter::EngagementFilter;
pub use pacing::Pacer;
pub use pipeline::{collect, CollectResult};
pub use walker::PageWalker;

// Re-export implementations
pub use models::InferenceBackend;
pub use sinks::{CsvSink, MemorySink};
pub use sources::HttpSource;

// Re-export testing utilities
pub use testing::{MockModel, MockSource};
