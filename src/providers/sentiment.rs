//! Injury-risk scoring from player mentions.
//!
//! Mentions are keyword-filtered, the survivors are run through a sentiment
//! model, and the count of confidently negative texts picks the risk tier.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{RiskAssessment, RiskLevel};
use super::{MentionFeed, RiskOracle};
use crate::core::http::{bearer_header_map, build_client};
use crate::{Result, SportIntelError};

pub const SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";
pub const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

const INJURY_KEYWORDS: &[&str] = &[
    "injury", "injured", "hurt", "pain", "questionable", "doubtful", "out", "sore", "strain",
    "sprain", "limited", "sit out", "miss", "ankle", "knee", "shoulder", "back", "hamstring",
    "calf",
];

const MAX_CLASSIFIED: usize = 10;
const MAX_EVIDENCE: usize = 3;
const NEGATIVE_LABEL: &str = "LABEL_0";
const NEGATIVE_THRESHOLD: f64 = 0.55;

/// Top label the model assigns to one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentLabel {
    pub label: String,
    pub score: f64,
}

impl SentimentLabel {
    fn is_negative(&self) -> bool {
        self.label == NEGATIVE_LABEL
    }
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentLabel>;
}

/// Hosted inference for [`SENTIMENT_MODEL`].
pub struct HuggingFaceClassifier {
    client: Client,
    url: String,
}

impl HuggingFaceClassifier {
    pub const NAME: &'static str = "huggingface";

    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(bearer_header_map(Some(api_key))?, timeout)?,
            url: format!("{}/{}", base_url.trim_end_matches('/'), SENTIMENT_MODEL),
        })
    }
}

/// The inference API nests the label list one level deeper for single inputs
/// on some deployments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<SentimentLabel>>),
    Flat(Vec<SentimentLabel>),
}

impl ClassificationResponse {
    fn top_label(self) -> Option<SentimentLabel> {
        let labels = match self {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(labels) => labels,
        };
        labels
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentLabel> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| SportIntelError::unavailable(Self::NAME, e))?;

        if !response.status().is_success() {
            return Err(SportIntelError::unavailable(
                Self::NAME,
                format!("HTTP {}", response.status().as_u16()),
            ));
        }

        let parsed: ClassificationResponse = response
            .json()
            .await
            .map_err(|e| SportIntelError::unavailable(Self::NAME, e))?;
        parsed.top_label().ok_or(SportIntelError::NoData)
    }
}

/// Texts mentioning any injury keyword.
pub fn injury_mentions(texts: &[String]) -> Vec<&String> {
    texts
        .iter()
        .filter(|text| {
            let lower = text.to_lowercase();
            INJURY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .collect()
}

/// Risk tier for a count of negative mentions: (level, multiplier).
pub fn risk_tier(negatives: usize) -> (RiskLevel, f64) {
    match negatives {
        n if n >= 5 => (RiskLevel::High, 0.7),
        n if n >= 3 => (RiskLevel::Medium, 0.85),
        n if n >= 1 => (RiskLevel::Low, 0.95),
        _ => (RiskLevel::Low, 1.0),
    }
}

/// [`RiskOracle`] backed by a sentiment classifier.
pub struct InjuryRiskAnalyzer {
    classifier: Arc<dyn SentimentClassifier>,
}

impl InjuryRiskAnalyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl RiskOracle for InjuryRiskAnalyzer {
    async fn score_risk(&self, player_name: &str, mentions: &[String]) -> RiskAssessment {
        let relevant = injury_mentions(mentions);
        if relevant.is_empty() {
            return RiskAssessment {
                level: RiskLevel::Low,
                confidence: 0.95,
                adjustment: 1.0,
                negatives: 0,
                evidence: Vec::new(),
            };
        }

        let classified = join_all(
            relevant
                .into_iter()
                .take(MAX_CLASSIFIED)
                .map(|text| async move { (text, self.classifier.classify(text).await) }),
        )
        .await;

        let mut scored = Vec::new();
        for (text, result) in classified {
            match result {
                Ok(label) => scored.push((text, label)),
                Err(e) => warn!(player = player_name, error = %e, "sentiment classification failed"),
            }
        }

        if scored.is_empty() {
            return RiskAssessment::neutral();
        }

        let negatives = scored
            .iter()
            .filter(|(_, label)| label.is_negative() && label.score > NEGATIVE_THRESHOLD)
            .count();
        let (level, adjustment) = risk_tier(negatives);

        let mut negative_texts: Vec<_> = scored
            .iter()
            .filter(|(_, label)| label.is_negative())
            .collect();
        negative_texts.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        let evidence = negative_texts
            .into_iter()
            .take(MAX_EVIDENCE)
            .map(|(text, _)| (*text).clone())
            .collect();

        debug!(player = player_name, negatives, ?level, "injury risk scored");
        RiskAssessment {
            level,
            confidence: (negatives as f64 / 10.0 + 0.5).min(0.95),
            adjustment,
            negatives,
            evidence,
        }
    }
}

/// Oracle used when no model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralOracle;

#[async_trait]
impl RiskOracle for NeutralOracle {
    async fn score_risk(&self, _player_name: &str, _mentions: &[String]) -> RiskAssessment {
        RiskAssessment::neutral()
    }
}

/// Fixed name -> mentions table. Empty by default.
#[derive(Debug, Clone, Default)]
pub struct StaticMentionFeed {
    mentions: HashMap<String, Vec<String>>,
}

impl StaticMentionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mentions<I, S>(mut self, player_name: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mentions
            .entry(player_name.to_lowercase())
            .or_default()
            .extend(texts.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl MentionFeed for StaticMentionFeed {
    async fn mentions(&self, player_name: &str) -> Vec<String> {
        self.mentions
            .get(&player_name.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
