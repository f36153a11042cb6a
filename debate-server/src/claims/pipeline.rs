//! Two-stage pipeline orchestration for one transcript submission.

use std::sync::Arc;
use tracing::debug;

use crate::llm::{LlmError, TextGenerator};

use super::analyzer::ClaimAnalyzer;
use super::extractor::ClaimExtractor;
use super::types::ClaimVerdict;

/// Extraction followed by analysis, stateless between submissions.
///
/// The two generator calls are sequential because analysis consumes
/// extraction's output; independent submissions run their own pipelines
/// concurrently.
pub struct AnalysisPipeline {
    extractor: ClaimExtractor,
    analyzer: ClaimAnalyzer,
}

impl AnalysisPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        extraction_model: &str,
        analysis_model: &str,
    ) -> Self {
        Self {
            extractor: ClaimExtractor::new(generator.clone(), extraction_model),
            analyzer: ClaimAnalyzer::new(generator, analysis_model),
        }
    }

    /// Fact-check one transcript chunk against the current topic.
    ///
    /// Zero extracted claims short-circuit to an empty result with no
    /// analysis call.
    pub async fn run(&self, transcript: &str, topic: &str) -> Result<Vec<ClaimVerdict>, LlmError> {
        let candidates = self.extractor.extract(transcript).await?;
        if candidates.is_empty() {
            debug!("No claim candidates; skipping analysis");
            return Ok(Vec::new());
        }

        self.analyzer.analyze(&candidates, topic).await
    }
}
