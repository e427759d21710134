//! Sentiment-comparison strategy.

use async_trait::async_trait;

use crate::classify::normalize::normalize;
use crate::classify::{Category, Classifier};
use crate::error::ClassifyResult;
use crate::traits::model::ModelBackend;

/// Classifies by the sign of (positive − negative) sentiment on the
/// normalized text.
pub struct SentimentClassifier<B: ModelBackend> {
    backend: B,
}

impl<B: ModelBackend> SentimentClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<B: ModelBackend> Classifier for SentimentClassifier<B> {
    async fn classify(&self, text: &str) -> ClassifyResult<Category> {
        let scores = self.backend.sentiment(&normalize(text)).await?;
        Ok(if scores.is_positive() {
            Category::Healthy
        } else {
            Category::Unhealthy
        })
    }
}
