//! Model backend trait: the external text-classification service.
//!
//! Classification strategies that need a model (sentiment comparison,
//! zero-shot labeling) go through this seam. Strategies that do not
//! (lexicon dominance) never touch it.

use async_trait::async_trait;

use crate::error::ClassifyResult;

/// Positive/negative confidence scores for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
}

impl SentimentScores {
    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    /// Whether the positive score strictly dominates.
    pub fn is_positive(&self) -> bool {
        self.positive > self.negative
    }
}

/// One candidate label with its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// External inference backend for text classification.
///
/// Implementations wrap a hosted model endpoint. An unreachable
/// backend or an unusable response is an error, never a default
/// category.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Score the text's sentiment.
    async fn sentiment(&self, text: &str) -> ClassifyResult<SentimentScores>;

    /// Score the text against an explicit candidate label set,
    /// best-first (zero-shot labeling).
    async fn rank_labels(&self, text: &str, labels: &[&str]) -> ClassifyResult<Vec<LabelScore>>;
}
