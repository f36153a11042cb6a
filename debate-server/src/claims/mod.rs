//! Claim extraction and analysis.
//!
//! One transcript submission flows through two model calls:
//!
//! ```text
//! transcript ──▶ ClaimExtractor ──▶ [ClaimCandidate] ──▶ ClaimAnalyzer ──▶ [ClaimVerdict]
//!                (flash-lite)                             (flash + topic)
//! ```
//!
//! Model output is never trusted: both stages run their responses
//! through the defensive parsers in `normalize`, so a malformed reply
//! degrades to empty candidates or placeholder verdicts instead of an
//! error.

pub mod analyzer;
pub mod extractor;
pub mod normalize;
pub mod pipeline;
pub mod types;

// Re-export core types
pub use analyzer::{ClaimAnalyzer, DEFAULT_ANALYSIS_MODEL};
pub use extractor::{ClaimExtractor, DEFAULT_EXTRACTION_MODEL};
pub use pipeline::AnalysisPipeline;
pub use types::{ClaimCandidate, ClaimVerdict, Confidence, Verdict};
