//! Finding extraction from model output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Model inference error: {0}")]
    Inference(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Raw triage output from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageOutput {
    pub findings: Vec<RawFinding>,
}

/// A clinical finding extracted from a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFinding {
    /// Tooth number in FDI notation, if the note names one
    pub tooth: Option<String>,
    /// Condition observed (caries, calculus, impaction, ...)
    pub condition: String,
    /// "mild", "moderate", or "severe", if stated
    pub severity: Option<String>,
    /// Extraction confidence, 0.0 to 1.0
    pub confidence: f64,
}

impl RawFinding {
    /// Findings below this confidence are always flagged for review.
    pub const REVIEW_THRESHOLD: f64 = 0.75;

    /// Whether this finding needs explicit dentist attention before it can
    /// inform a treatment plan.
    pub fn needs_review(&self) -> bool {
        self.confidence < Self::REVIEW_THRESHOLD || self.severity.as_deref() == Some("severe")
    }
}

/// Parse model output JSON into structured findings.
pub fn parse_triage_output(json: &str) -> ExtractionResult<TriageOutput> {
    // Try to find JSON in the response (in case the model adds extra text)
    let json_start = json
        .find('{')
        .ok_or_else(|| ExtractionError::InvalidFormat("No JSON object found in response".into()))?;
    let json_end = json
        .rfind('}')
        .ok_or_else(|| ExtractionError::InvalidFormat("No closing brace found in response".into()))?;

    let json_slice = &json[json_start..=json_end];
    let output: TriageOutput = serde_json::from_str(json_slice)?;

    Ok(output)
}

/// Mock analyzer for testing without actual model inference.
pub struct MockAnalyzer;

impl MockAnalyzer {
    /// Extract findings using simple pattern matching (for testing).
    pub fn analyze(note: &str) -> TriageOutput {
        let mut findings = Vec::new();
        let note_lower = note.to_lowercase();

        // Simple pattern matching for common conditions
        let patterns = [
            ("caries", None),
            ("cavity", Some("caries")),
            ("calculus", None),
            ("calc ", Some("calculus")),
            ("periapical", None),
            ("impacted", None),
            ("impaction", Some("impacted")),
            ("fracture", None),
            ("abscess", None),
            ("gingivitis", None),
            ("mobility", None),
        ];

        for (pattern, canonical) in patterns {
            if let Some(pos) = note_lower.find(pattern) {
                let condition = canonical.unwrap_or(pattern).to_string();
                let severity = extract_severity(&note_lower[..pos]);
                let tooth = extract_tooth(&note_lower);

                findings.push(RawFinding {
                    tooth,
                    condition,
                    severity,
                    confidence: 0.8,
                });
            }
        }

        TriageOutput { findings }
    }
}

/// Find a severity keyword in the text before the condition.
fn extract_severity(text: &str) -> Option<String> {
    for keyword in ["severe", "deep", "moderate", "mild", "slight"] {
        if text.contains(keyword) {
            let canonical = match keyword {
                "deep" => "severe",
                "slight" => "mild",
                other => other,
            };
            return Some(canonical.to_string());
        }
    }
    None
}

/// Find an FDI tooth number in the note. FDI numbers are two digits where
/// the first is the quadrant (1-4 permanent, 5-8 deciduous).
fn extract_tooth(text: &str) -> Option<String> {
    for word in text.split(|c: char| !c.is_ascii_digit()) {
        if word.len() == 2 {
            let quadrant = word.as_bytes()[0] - b'0';
            let position = word.as_bytes()[1] - b'0';
            if (1..=8).contains(&quadrant) && (1..=8).contains(&position) {
                return Some(word.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triage_output() {
        let json = r#"{"findings":[{"tooth":"36","condition":"caries","severity":"severe","confidence":0.9}]}"#;

        let output = parse_triage_output(json).unwrap();
        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].condition, "caries");
        assert_eq!(output.findings[0].tooth.as_deref(), Some("36"));
    }

    #[test]
    fn test_parse_triage_output_with_prefix() {
        let json = r#"Here are the extracted findings:
{"findings":[{"tooth":null,"condition":"calculus","severity":null,"confidence":0.85}]}"#;

        let output = parse_triage_output(json).unwrap();
        assert_eq!(output.findings.len(), 1);
    }

    #[test]
    fn test_parse_rejects_missing_json() {
        let err = parse_triage_output("no structured data here").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidFormat(_)));
    }

    #[test]
    fn test_needs_review_low_confidence() {
        let finding = RawFinding {
            tooth: None,
            condition: "caries".into(),
            severity: None,
            confidence: 0.5,
        };
        assert!(finding.needs_review());
    }

    #[test]
    fn test_needs_review_severe() {
        let finding = RawFinding {
            tooth: Some("36".into()),
            condition: "caries".into(),
            severity: Some("severe".into()),
            confidence: 0.95,
        };
        assert!(finding.needs_review());

        let mild = RawFinding {
            severity: Some("mild".into()),
            ..finding
        };
        assert!(!mild.needs_review());
    }

    #[test]
    fn test_mock_analyzer() {
        let output = MockAnalyzer::analyze("Deep caries on 36, RCT indicated");

        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].condition, "caries");
        assert_eq!(output.findings[0].severity.as_deref(), Some("severe"));
        assert_eq!(output.findings[0].tooth.as_deref(), Some("36"));
    }

    #[test]
    fn test_mock_analyzer_alias() {
        let output = MockAnalyzer::analyze("Large cavity on lower left");
        assert_eq!(output.findings.len(), 1);
        // Should map cavity to caries
        assert_eq!(output.findings[0].condition, "caries");
    }

    #[test]
    fn test_mock_analyzer_multiple() {
        let output = MockAnalyzer::analyze("Calculus buildup, mild gingivitis");
        assert_eq!(output.findings.len(), 2);
    }

    #[test]
    fn test_extract_tooth_fdi_only() {
        assert_eq!(extract_tooth("caries on 36"), Some("36".to_string()));
        assert_eq!(extract_tooth("48 impacted"), Some("48".to_string()));
        // 90 is not a valid FDI quadrant
        assert_eq!(extract_tooth("seen 90 days ago"), None);
        assert_eq!(extract_tooth("no numbers"), None);
    }
}
