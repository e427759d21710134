//! Hosted inference backend over HTTP.
//!
//! Wraps a text-classification service with two endpoints:
//! `POST /sentiment` returning positive/negative label scores, and
//! `POST /zero-shot` ranking an explicit candidate label set. Response
//! shapes follow the common hosted-inference convention of parallel
//! `labels`/`scores` arrays.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, ClassifyResult};
use crate::traits::{LabelScore, ModelBackend, SentimentScores};

/// Model backend backed by a bearer-authenticated inference API.
pub struct InferenceBackend {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl InferenceBackend {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> ClassifyResult<R> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| ClassifyError::Backend(Box::new(e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifyError::Backend(
                format!("status {}: {}", status.as_u16(), body).into(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl ModelBackend for InferenceBackend {
    async fn sentiment(&self, text: &str) -> ClassifyResult<SentimentScores> {
        let scored: Vec<WireLabelScore> = self
            .post_json("/sentiment", &TextRequest { text })
            .await?;
        sentiment_from_labels(&scored)
    }

    async fn rank_labels(&self, text: &str, labels: &[&str]) -> ClassifyResult<Vec<LabelScore>> {
        let resp: WireZeroShot = self
            .post_json(
                "/zero-shot",
                &ZeroShotRequest {
                    text,
                    candidate_labels: labels,
                },
            )
            .await?;

        if resp.labels.len() != resp.scores.len() {
            return Err(ClassifyError::MalformedResponse(format!(
                "{} labels but {} scores",
                resp.labels.len(),
                resp.scores.len()
            )));
        }

        Ok(resp
            .labels
            .into_iter()
            .zip(resp.scores)
            .map(|(label, score)| LabelScore::new(label, score))
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    text: &'a str,
    candidate_labels: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct WireLabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct WireZeroShot {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Pull positive and negative scores out of a sentiment label list.
/// Both must be present; anything less is a malformed response.
fn sentiment_from_labels(scored: &[WireLabelScore]) -> ClassifyResult<SentimentScores> {
    let mut positive = None;
    let mut negative = None;
    for entry in scored {
        match entry.label.to_ascii_lowercase().as_str() {
            "positive" => positive = Some(entry.score),
            "negative" => negative = Some(entry.score),
            _ => {}
        }
    }
    match (positive, negative) {
        (Some(positive), Some(negative)) => Ok(SentimentScores::new(positive, negative)),
        _ => Err(ClassifyError::MalformedResponse(
            "sentiment response missing positive or negative label".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_from_labels_case_insensitive() {
        let scored = vec![
            WireLabelScore {
                label: "POSITIVE".into(),
                score: 0.91,
            },
            WireLabelScore {
                label: "NEGATIVE".into(),
                score: 0.09,
            },
        ];
        let scores = sentiment_from_labels(&scored).unwrap();
        assert!(scores.is_positive());
        assert_eq!(scores.positive, 0.91);
    }

    #[test]
    fn test_sentiment_from_labels_missing_negative() {
        let scored = vec![WireLabelScore {
            label: "positive".into(),
            score: 0.5,
        }];
        let err = sentiment_from_labels(&scored).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse(_)));
    }

    #[test]
    fn test_zero_shot_response_zips_labels_and_scores() {
        let resp: WireZeroShot =
            serde_json::from_str(r#"{"labels": ["healthy", "unhealthy"], "scores": [0.8, 0.2]}"#)
                .unwrap();
        assert_eq!(resp.labels.len(), resp.scores.len());
        let ranked: Vec<LabelScore> = resp
            .labels
            .into_iter()
            .zip(resp.scores)
            .map(|(label, score)| LabelScore::new(label, score))
            .collect();
        assert_eq!(ranked[0], LabelScore::new("healthy", 0.8));
    }
}
