//! Lexicon strategy: keyword dominance with a sentiment tie-break.

use async_trait::async_trait;

use crate::classify::normalize::{count_indicators, normalize};
use crate::classify::{Category, Classifier};
use crate::error::ClassifyResult;
use crate::traits::model::ModelBackend;

/// Domain terms whose presence marks a post as on-topic. Their absence
/// sends the text straight to the sentiment fallback.
const FOOD_TERMS: &[&str] = &[
    "vegetable",
    "fruit",
    "meat",
    "dairy",
    "grain",
    "protein",
    "carb",
    "fat",
    "sugar",
    "salt",
    "meal",
    "breakfast",
    "lunch",
    "dinner",
    "snack",
    "diet",
    "nutrition",
    "calorie",
    "vitamin",
    "mineral",
    "fiber",
    "organic",
    "processed",
    "fast food",
    "restaurant",
    "cook",
    "bake",
    "fry",
    "boil",
    "grill",
    "recipe",
];

/// Indicators of healthy eating habits.
const HEALTHY_INDICATORS: &[&str] = &[
    "healthy",
    "nutritious",
    "balanced",
    "fresh",
    "homemade",
    "organic",
    "natural",
    "whole",
    "protein",
    "vitamin",
    "nutrient",
    "fiber",
    "exercise",
    "workout",
    "fitness",
    "diet",
    "portion",
    "control",
];

/// Indicators of unhealthy eating habits.
const UNHEALTHY_INDICATORS: &[&str] = &[
    "junk",
    "fast food",
    "fried",
    "greasy",
    "fatty",
    "sugar",
    "sweet",
    "processed",
    "microwave",
    "frozen",
    "takeout",
    "takeaway",
    "high calorie",
    "high fat",
    "high carb",
    "high sugar",
    "saturated",
    "trans fat",
];

/// Lexicon classifier: counts curated healthy and unhealthy indicator
/// terms in the normalized text.
///
/// A strictly dominant set decides the category directly, with no
/// backend call. On a tie (including zero/zero), or when the text
/// contains no food term at all, falls through to a sentiment
/// comparison via the backend.
pub struct LexiconClassifier<B: ModelBackend> {
    backend: B,
}

impl<B: ModelBackend> LexiconClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    async fn sentiment_fallback(&self, text: &str) -> ClassifyResult<Category> {
        let scores = self.backend.sentiment(text).await?;
        Ok(if scores.is_positive() {
            Category::Healthy
        } else {
            Category::Unhealthy
        })
    }
}

#[async_trait]
impl<B: ModelBackend> Classifier for LexiconClassifier<B> {
    async fn classify(&self, text: &str) -> ClassifyResult<Category> {
        let clean = normalize(text);

        if count_indicators(&clean, FOOD_TERMS) == 0 {
            return self.sentiment_fallback(&clean).await;
        }

        let healthy = count_indicators(&clean, HEALTHY_INDICATORS);
        let unhealthy = count_indicators(&clean, UNHEALTHY_INDICATORS);

        if healthy > unhealthy {
            Ok(Category::Healthy)
        } else if unhealthy > healthy {
            Ok(Category::Unhealthy)
        } else {
            self.sentiment_fallback(&clean).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use crate::traits::model::SentimentScores;

    #[tokio::test]
    async fn test_dominant_unhealthy_skips_backend() {
        let backend = MockModel::new();
        let classifier = LexiconClassifier::new(backend.clone());

        // Two unhealthy indicators ("junk", "fried"), zero healthy.
        let category = classifier
            .classify("dinner was junk again, everything fried")
            .await
            .unwrap();

        assert_eq!(category, Category::Unhealthy);
        assert_eq!(backend.sentiment_calls(), 0);
    }

    #[tokio::test]
    async fn test_dominant_healthy_skips_backend() {
        let backend = MockModel::new();
        let classifier = LexiconClassifier::new(backend.clone());

        let category = classifier
            .classify("fresh homemade meal with organic vegetables")
            .await
            .unwrap();

        assert_eq!(category, Category::Healthy);
        assert_eq!(backend.sentiment_calls(), 0);
    }

    #[tokio::test]
    async fn test_tie_falls_through_to_sentiment() {
        let backend =
            MockModel::new().with_default_sentiment(SentimentScores::new(0.9, 0.1));
        let classifier = LexiconClassifier::new(backend.clone());

        // One healthy ("fresh"), one unhealthy ("fried"): a tie.
        let category = classifier
            .classify("fresh bread but fried chicken for dinner")
            .await
            .unwrap();

        assert_eq!(category, Category::Healthy);
        assert_eq!(backend.sentiment_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_zero_with_food_terms_falls_through() {
        let backend =
            MockModel::new().with_default_sentiment(SentimentScores::new(0.2, 0.8));
        let classifier = LexiconClassifier::new(backend.clone());

        // "restaurant" is a food term; no indicators on either side.
        let category = classifier
            .classify("went to a restaurant with friends")
            .await
            .unwrap();

        assert_eq!(category, Category::Unhealthy);
        assert_eq!(backend.sentiment_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_food_term_uses_sentiment() {
        let backend =
            MockModel::new().with_default_sentiment(SentimentScores::new(0.7, 0.3));
        let classifier = LexiconClassifier::new(backend.clone());

        let category = classifier.classify("what a beautiful morning").await.unwrap();

        assert_eq!(category, Category::Healthy);
        assert_eq!(backend.sentiment_calls(), 1);
    }

    #[tokio::test]
    async fn test_hashtag_indicators_count() {
        let backend = MockModel::new();
        let classifier = LexiconClassifier::new(backend.clone());

        // "#junkfood" normalizes to "junkfood" which contains "junk";
        // "fastfood" does not match the two-word "fast food" term.
        let category = classifier
            .classify("#junkfood cravings and a greasy snack")
            .await
            .unwrap();

        assert_eq!(category, Category::Unhealthy);
        assert_eq!(backend.sentiment_calls(), 0);
    }
}
