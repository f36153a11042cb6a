//! Claim analysis: verdicts, deviation scores, and citations.

use std::sync::Arc;
use tracing::debug;

use crate::llm::{LlmError, TextGenerator};

use super::normalize::normalize_response;
use super::types::{ClaimCandidate, ClaimVerdict};

/// Default model tier for analysis.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";

/// Scores extracted claims against the debate topic and known facts.
pub struct ClaimAnalyzer {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ClaimAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, model: &str) -> Self {
        Self {
            generator,
            model: model.to_string(),
        }
    }

    /// Analyze a claim set in the context of `topic`.
    ///
    /// An empty claim set returns immediately without a generator call.
    /// The response goes through the normalization ladder, so malformed
    /// model output still produces usable verdicts; only generator
    /// failures propagate.
    pub async fn analyze(
        &self,
        claims: &[ClaimCandidate],
        topic: &str,
    ) -> Result<Vec<ClaimVerdict>, LlmError> {
        if claims.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = analysis_prompt(claims, topic);
        let raw = self.generator.generate(&self.model, &prompt).await?;
        debug!(model = %self.model, raw = %raw, "Raw analysis response");

        Ok(normalize_response(&raw, claims))
    }
}

fn analysis_prompt(claims: &[ClaimCandidate], topic: &str) -> String {
    let topic = if topic.trim().is_empty() {
        "No topic provided"
    } else {
        topic
    };
    let claims_json = serde_json::to_string_pretty(claims).unwrap_or_default();

    format!(
        r#"You are a real-time debate fact-checking and moderation assistant.

You will receive:
- The CURRENT DEBATE TOPIC
- A list of fact-checkable claims extracted from a debater's statement

Your tasks:
1. Evaluate the factual accuracy of each claim.
2. Measure how far each claim deviates from established facts.
3. Measure how far each claim deviates from the debate topic.
4. Provide reliable citations whenever possible.
5. Remain strictly neutral and evidence-based.

Scoring definitions:
- topicDeviationScore (0 to 1):
  0 = fully on-topic
  1 = completely off-topic

- factDeviationScore (0 to 1):
  0 = factually accurate
  1 = factually false
  Values between indicate misleading or partially incorrect claims.

CURRENT TOPIC:
"{topic}"

CLAIMS:
{claims_json}

Return ONLY valid JSON in this structure:
[
  {{
    "claim": "Exact claim text",
    "verdict": "True | False | Misleading | Uncertain",

    "topicDeviationScore": 0.0,
    "topicDeviationReasoning": "Short explanation",

    "factDeviationScore": 0.0,
    "factDeviationReasoning": "Short explanation",

    "fact": "Correct factual information",
    "source": "Source name (e.g. WHO, World Bank)",
    "sourceUrl": "https://...",
    "sourceConfidence": 0.95
  }}
]"#
    )
}
