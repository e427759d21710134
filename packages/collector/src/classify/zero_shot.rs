//! Zero-shot strategy: candidate-label ranking via the backend.

use async_trait::async_trait;

use crate::classify::{Category, Classifier};
use crate::error::{ClassifyError, ClassifyResult};
use crate::traits::model::ModelBackend;

/// Hands the full candidate label set to the backend and takes the
/// top-ranked label verbatim.
pub struct ZeroShotClassifier<B: ModelBackend> {
    backend: B,
}

impl<B: ModelBackend> ZeroShotClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<B: ModelBackend> Classifier for ZeroShotClassifier<B> {
    async fn classify(&self, text: &str) -> ClassifyResult<Category> {
        let ranked = self.backend.rank_labels(text, &Category::LABELS).await?;

        let top = ranked.first().ok_or_else(|| {
            ClassifyError::MalformedResponse("backend returned no labels".to_string())
        })?;

        top.label.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use crate::traits::model::LabelScore;

    #[tokio::test]
    async fn test_takes_top_label_verbatim() {
        let backend = MockModel::new().with_ranking(
            "late night pizza",
            vec![
                LabelScore::new("unhealthy", 0.91),
                LabelScore::new("healthy", 0.09),
            ],
        );
        let classifier = ZeroShotClassifier::new(backend.clone());

        assert_eq!(
            classifier.classify("late night pizza").await.unwrap(),
            Category::Unhealthy
        );
        assert_eq!(backend.rank_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_top_label_is_an_error() {
        let backend = MockModel::new()
            .with_ranking("text", vec![LabelScore::new("neutral", 0.6)]);
        let classifier = ZeroShotClassifier::new(backend);

        let err = classifier.classify("text").await.unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedLabel { .. }));
    }

    #[tokio::test]
    async fn test_empty_ranking_is_an_error() {
        let backend = MockModel::new().with_ranking("text", vec![]);
        let classifier = ZeroShotClassifier::new(backend);

        let err = classifier.classify("text").await.unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse(_)));
    }
}
