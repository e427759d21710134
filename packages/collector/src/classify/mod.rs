//! Classification engine: maps post text to a category.
//!
//! Strategies are interchangeable behind the [`Classifier`] trait; the
//! collection loop is agnostic to which one is active. An engine is
//! constructed once and passed by reference into the loop; strategy
//! selection is a constructor-time choice, not a global.

pub mod lexicon;
pub mod normalize;
pub mod sentiment;
pub mod zero_shot;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, ClassifyResult};

pub use lexicon::LexiconClassifier;
pub use normalize::normalize;
pub use sentiment::SentimentClassifier;
pub use zero_shot::ZeroShotClassifier;

/// Semantic category assigned to exactly one post's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healthy,
    Unhealthy,
}

impl Category {
    /// All labels, in the order handed to zero-shot backends.
    pub const LABELS: [&'static str; 2] = ["healthy", "unhealthy"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Healthy => "healthy",
            Category::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "healthy" => Ok(Category::Healthy),
            "unhealthy" => Ok(Category::Unhealthy),
            other => Err(ClassifyError::UnrecognizedLabel {
                label: other.to_string(),
            }),
        }
    }
}

/// A classification strategy.
///
/// # Implementations
///
/// - [`LexiconClassifier`] - keyword dominance with sentiment tie-break
/// - [`SentimentClassifier`] - pure sentiment comparison
/// - [`ZeroShotClassifier`] - candidate-label ranking via the backend
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Assign a category to the text, or fail, never silently
    /// default.
    async fn classify(&self, text: &str) -> ClassifyResult<Category>;
}
