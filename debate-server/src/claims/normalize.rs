//! Defensive normalization of model output.
//!
//! Both pipeline stages treat the generator as an untrusted producer:
//! responses arrive as fenced Markdown, bare JSON, or free text. These
//! functions are pure so the whole ladder is testable without a network.

use serde_json::Value;

use super::types::{ClaimCandidate, ClaimVerdict, Verdict};

/// Score assumed when the model omits or mistypes a deviation field.
const DEFAULT_DEVIATION: f64 = 0.5;

/// Strip Markdown code fences from a model response and trim whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse an extraction response into claim candidates.
///
/// Anything that is not a JSON array yields no claims. Array elements
/// that do not decode as candidates are skipped rather than failing the
/// batch.
pub fn parse_candidates(raw: &str) -> Vec<ClaimCandidate> {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<ClaimCandidate>(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize an analysis response into broadcast-ready verdicts.
///
/// Accepted shapes, in priority order: a JSON array (one verdict per
/// element), a bare JSON object (a single verdict), and anything else
/// (a single fallback verdict built from the raw text). Never fails,
/// and never returns an empty list for a non-empty claim set.
pub fn normalize_response(raw: &str, claims: &[ClaimCandidate]) -> Vec<ClaimVerdict> {
    let cleaned = strip_code_fences(raw);

    let verdicts = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => items.iter().map(|item| normalize_item(item, claims)).collect(),
        Ok(item @ Value::Object(_)) => vec![normalize_item(&item, claims)],
        _ => vec![fallback_verdict(&cleaned, claims)],
    };

    if verdicts.is_empty() && !claims.is_empty() {
        return vec![fallback_verdict(&cleaned, claims)];
    }
    verdicts
}

/// Normalize one JSON element, filling documented defaults for every
/// missing or mistyped field.
fn normalize_item(item: &Value, claims: &[ClaimCandidate]) -> ClaimVerdict {
    let claim = non_empty_str(&item["claim"])
        .or_else(|| non_empty_str(&item["Claim"]))
        .map(str::to_string)
        .unwrap_or_else(|| joined_claims(claims));

    let verdict = non_empty_str(&item["verdict"])
        .or_else(|| non_empty_str(&item["Verdict"]))
        .map(Verdict::from_label)
        .unwrap_or(Verdict::Uncertain);

    ClaimVerdict {
        claim,
        verdict,
        topic_deviation_score: clamped_score(&item["topicDeviationScore"], DEFAULT_DEVIATION),
        topic_deviation_reasoning: text_or(
            &item["topicDeviationReasoning"],
            "No topic deviation reasoning provided.",
        ),
        fact_deviation_score: clamped_score(&item["factDeviationScore"], DEFAULT_DEVIATION),
        fact_deviation_reasoning: text_or(
            &item["factDeviationReasoning"],
            "No factual deviation reasoning provided.",
        ),
        fact: text_or(&item["fact"], "Not specified."),
        source: text_or(&item["source"], "Not specified."),
        source_url: non_empty_str(&item["sourceUrl"]).map(str::to_string),
        source_confidence: clamped_score(&item["sourceConfidence"], 0.0),
    }
}

/// Last-resort verdict for output that is not JSON at all. The claim
/// text is the joined claim set; the verdict is `False` only when the
/// raw text flags the claims as inaccurate.
fn fallback_verdict(raw: &str, claims: &[ClaimCandidate]) -> ClaimVerdict {
    let verdict = if raw.to_uppercase().contains("INACCURATE") {
        Verdict::False
    } else {
        Verdict::Uncertain
    };

    ClaimVerdict {
        claim: joined_claims(claims),
        verdict,
        topic_deviation_score: DEFAULT_DEVIATION,
        topic_deviation_reasoning:
            "Topic relevance could not be determined from unstructured AI output.".to_string(),
        fact_deviation_score: DEFAULT_DEVIATION,
        fact_deviation_reasoning:
            "Factual deviation could not be determined from unstructured AI output.".to_string(),
        fact: "Could not verify.".to_string(),
        source: "N/A".to_string(),
        source_url: None,
        source_confidence: 0.0,
    }
}

fn joined_claims(claims: &[ClaimCandidate]) -> String {
    claims
        .iter()
        .map(|c| c.claim.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Clamp a numeric field into `[0, 1]`; non-numbers get the default.
fn clamped_score(value: &Value, default: f64) -> f64 {
    match value.as_f64() {
        Some(score) => score.clamp(0.0, 1.0),
        None => default,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn text_or(value: &Value, default: &str) -> String {
    non_empty_str(value).unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Vec<ClaimCandidate> {
        vec![
            ClaimCandidate::new("Country X reduced emissions by 50% last year"),
            ClaimCandidate::new("The treaty was signed in 2015"),
        ]
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  plain text  "), "plain text");
    }

    #[test]
    fn test_parse_candidates_array() {
        let raw = r#"```json
[
  {"claim": "A", "reason": "r", "confidence": "low"},
  {"claim": "B"}
]
```"#;
        let candidates = parse_candidates(raw);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].claim, "A");
        assert_eq!(candidates[1].claim, "B");
    }

    #[test]
    fn test_parse_candidates_rejects_non_arrays() {
        assert!(parse_candidates(r#"{"claim": "A"}"#).is_empty());
        assert!(parse_candidates("no claims here").is_empty());
        assert!(parse_candidates("").is_empty());
    }

    #[test]
    fn test_parse_candidates_skips_undecodable_elements() {
        let raw = r#"[{"claim": "A"}, 42, {"reason": "missing claim"}]"#;
        let candidates = parse_candidates(raw);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].claim, "A");
    }

    #[test]
    fn test_normalize_array_response() {
        let raw = r#"[
  {
    "claim": "Country X reduced emissions by 50% last year",
    "verdict": "Misleading",
    "topicDeviationScore": 0.1,
    "topicDeviationReasoning": "Directly about climate policy",
    "factDeviationScore": 0.6,
    "factDeviationReasoning": "The real figure is 12%",
    "fact": "Emissions fell by 12%, not 50%",
    "source": "IEA",
    "sourceUrl": "https://example.org/iea",
    "sourceConfidence": 0.9
  },
  {
    "claim": "The treaty was signed in 2015",
    "verdict": "True"
  }
]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].verdict, Verdict::Misleading);
        assert_eq!(verdicts[0].source, "IEA");
        assert_eq!(verdicts[0].source_url.as_deref(), Some("https://example.org/iea"));

        // Omitted fields on the second element get the documented defaults.
        assert_eq!(verdicts[1].verdict, Verdict::True);
        assert_eq!(verdicts[1].topic_deviation_score, 0.5);
        assert_eq!(
            verdicts[1].topic_deviation_reasoning,
            "No topic deviation reasoning provided."
        );
        assert_eq!(verdicts[1].fact, "Not specified.");
        assert_eq!(verdicts[1].source_confidence, 0.0);
        assert!(verdicts[1].source_url.is_none());
    }

    #[test]
    fn test_normalize_single_object_response() {
        let raw = r#"{"claim": "The treaty was signed in 2015", "verdict": "True"}"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].verdict, Verdict::True);
    }

    #[test]
    fn test_normalize_clamps_scores() {
        let raw = r#"[{"claim": "A", "verdict": "True",
            "topicDeviationScore": 3.7,
            "factDeviationScore": -0.4,
            "sourceConfidence": 1.5}]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts[0].topic_deviation_score, 1.0);
        assert_eq!(verdicts[0].fact_deviation_score, 0.0);
        assert_eq!(verdicts[0].source_confidence, 1.0);
    }

    #[test]
    fn test_normalize_rejects_mistyped_scores() {
        let raw = r#"[{"claim": "A", "topicDeviationScore": "high", "sourceConfidence": "low"}]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts[0].topic_deviation_score, 0.5);
        assert_eq!(verdicts[0].source_confidence, 0.0);
    }

    #[test]
    fn test_normalize_capitalized_aliases() {
        let raw = r#"[{"Claim": "Aliased", "Verdict": "false"}]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts[0].claim, "Aliased");
        assert_eq!(verdicts[0].verdict, Verdict::False);
    }

    #[test]
    fn test_normalize_missing_claim_joins_input_set() {
        let raw = r#"[{"verdict": "True"}]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(
            verdicts[0].claim,
            "Country X reduced emissions by 50% last year | The treaty was signed in 2015"
        );
    }

    #[test]
    fn test_normalize_unknown_verdict_becomes_uncertain() {
        let raw = r#"[{"claim": "A", "verdict": "Partially True"}]"#;
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts[0].verdict, Verdict::Uncertain);
    }

    #[test]
    fn test_fallback_flags_inaccurate_text_as_false() {
        let raw = "The first claim is wildly inaccurate and the second is fine.";
        let verdicts = normalize_response(raw, &sample_claims());
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].verdict, Verdict::False);
        assert_eq!(verdicts[0].fact, "Could not verify.");
        assert_eq!(verdicts[0].source, "N/A");
        assert_eq!(
            verdicts[0].claim,
            "Country X reduced emissions by 50% last year | The treaty was signed in 2015"
        );
    }

    #[test]
    fn test_fallback_without_inaccurate_marker() {
        let verdicts = normalize_response("I cannot evaluate these claims.", &sample_claims());
        assert_eq!(verdicts[0].verdict, Verdict::Uncertain);
        assert_eq!(verdicts[0].topic_deviation_score, 0.5);
        assert_eq!(verdicts[0].source_confidence, 0.0);
    }

    #[test]
    fn test_empty_array_still_yields_a_verdict() {
        let verdicts = normalize_response("[]", &sample_claims());
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].verdict, Verdict::Uncertain);
    }

    #[test]
    fn test_empty_claims_and_empty_array_stay_empty() {
        assert!(normalize_response("[]", &[]).is_empty());
    }
}
