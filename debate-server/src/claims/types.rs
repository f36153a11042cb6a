//! Claim data model shared by the extraction and analysis stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extractor confidence that a span is objectively checkable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// A fact-checkable span of transcript text, before verdict scoring.
///
/// Decoded from the extraction response. Models sometimes capitalize the
/// `claim` key or omit the auxiliary fields, so those are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimCandidate {
    /// The claim text, quoted from the transcript.
    #[serde(alias = "Claim")]
    pub claim: String,
    /// Why the extractor considered it checkable.
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub confidence: Confidence,
}

impl ClaimCandidate {
    pub fn new(claim: &str) -> Self {
        Self {
            claim: claim.to_string(),
            reason: String::new(),
            confidence: Confidence::Medium,
        }
    }
}

/// Verdict label carried by a fact result.
///
/// `True`..`Uncertain` come from the analysis model. `RateLimited` and
/// `Error` are minted locally for rejection records and keep the
/// lowercase spelling clients already match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Misleading,
    Uncertain,
    #[serde(rename = "rate_limited")]
    RateLimited,
    #[serde(rename = "error")]
    Error,
}

impl Verdict {
    /// Map an upstream-supplied label onto a verdict.
    ///
    /// Matching is case-insensitive; anything unrecognized is `Uncertain`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "true" => Verdict::True,
            "false" => Verdict::False,
            "misleading" => Verdict::Misleading,
            _ => Verdict::Uncertain,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::True => write!(f, "True"),
            Verdict::False => write!(f, "False"),
            Verdict::Misleading => write!(f, "Misleading"),
            Verdict::Uncertain => write!(f, "Uncertain"),
            Verdict::RateLimited => write!(f, "rate_limited"),
            Verdict::Error => write!(f, "error"),
        }
    }
}

/// Fully normalized, broadcast-ready result of checking one claim.
///
/// Every field is always present. Scores are clamped to `[0, 1]` and
/// text fields that the model omitted hold documented placeholders, so
/// clients never see a partially absent record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimVerdict {
    pub claim: String,
    pub verdict: Verdict,
    /// 0 = fully on-topic, 1 = completely off-topic.
    pub topic_deviation_score: f64,
    pub topic_deviation_reasoning: String,
    /// 0 = factually accurate, 1 = factually false.
    pub fact_deviation_score: f64,
    pub fact_deviation_reasoning: String,
    /// Correct factual information, or an explanation for synthetic records.
    pub fact: String,
    pub source: String,
    pub source_url: Option<String>,
    pub source_confidence: f64,
}

impl ClaimVerdict {
    /// Rejection record broadcast when a connection trips the cooldown.
    pub fn rate_limited(submitted_text: &str) -> Self {
        Self::rejection(
            submitted_text,
            Verdict::RateLimited,
            "Please wait before submitting another claim.",
        )
    }

    /// Rejection record broadcast when the fact-checking pipeline fails.
    pub fn service_error(submitted_text: &str) -> Self {
        Self::rejection(
            submitted_text,
            Verdict::Error,
            "Fact-checking service unavailable",
        )
    }

    fn rejection(submitted_text: &str, verdict: Verdict, explanation: &str) -> Self {
        Self {
            claim: submitted_text.to_string(),
            verdict,
            topic_deviation_score: 0.5,
            topic_deviation_reasoning: "Not evaluated.".to_string(),
            fact_deviation_score: 0.5,
            fact_deviation_reasoning: "Not evaluated.".to_string(),
            fact: explanation.to_string(),
            source: "N/A".to_string(),
            source_url: None,
            source_confidence: 0.0,
        }
    }
}
