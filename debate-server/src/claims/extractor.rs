//! Claim extraction from finalized transcript chunks.

use std::sync::Arc;
use tracing::debug;

use crate::llm::{LlmError, TextGenerator};

use super::normalize::parse_candidates;
use super::types::ClaimCandidate;

/// Default model tier for extraction. A lighter tier than analysis; the
/// task is span selection, not evaluation.
pub const DEFAULT_EXTRACTION_MODEL: &str = "gemini-2.5-flash-lite";

/// Extracts objectively checkable claims from raw transcript text.
pub struct ClaimExtractor {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ClaimExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, model: &str) -> Self {
        Self {
            generator,
            model: model.to_string(),
        }
    }

    /// Extract claim candidates from one transcript chunk.
    ///
    /// Empty or whitespace-only transcripts yield no claims without a
    /// generator call. A response that is not a JSON array also yields
    /// no claims; only generator failures propagate.
    pub async fn extract(&self, transcript: &str) -> Result<Vec<ClaimCandidate>, LlmError> {
        if transcript.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = extraction_prompt(transcript);
        let raw = self.generator.generate(&self.model, &prompt).await?;
        let candidates = parse_candidates(&raw);

        debug!(
            candidates = candidates.len(),
            transcript_chars = transcript.len(),
            "Claim extraction complete"
        );
        Ok(candidates)
    }
}

fn extraction_prompt(transcript: &str) -> String {
    format!(
        r#"You are a fact-checking assistant.

Extract ONLY objectively fact-checkable claims.
Ignore opinions, comparisons, and subjective statements.

Transcript:
"{transcript}"

Return ONLY valid JSON:
[
  {{
    "claim": "exact claim text",
    "reason": "why this needs fact-checking",
    "confidence": "high|medium|low"
  }}
]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedGenerator {
        response: String,
        calls: AtomicUsize,
    }

    impl CannedGenerator {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_extracts_candidates_from_fenced_json() {
        let generator = CannedGenerator::new(
            "```json\n[{\"claim\": \"The sea level rose 20cm\", \"reason\": \"measurable\", \"confidence\": \"high\"}]\n```",
        );
        let extractor = ClaimExtractor::new(generator.clone(), "test-model");

        let candidates = extractor.extract("the sea level rose 20cm I think").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].claim, "The sea level rose 20cm");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_transcript_skips_generator() {
        let generator = CannedGenerator::new("[]");
        let extractor = ClaimExtractor::new(generator.clone(), "test-model");

        assert!(extractor.extract("").await.unwrap().is_empty());
        assert!(extractor.extract("   \n\t").await.unwrap().is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_array_response_yields_no_claims() {
        let generator = CannedGenerator::new("I found no claims in this transcript.");
        let extractor = ClaimExtractor::new(generator, "test-model");

        let candidates = extractor.extract("just vibes and opinions").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_embeds_transcript() {
        let prompt = extraction_prompt("Unemployment hit 4% in June");
        assert!(prompt.contains("\"Unemployment hit 4% in June\""));
        assert!(prompt.contains("fact-checkable claims"));
    }
}
