//! Evidence JSON handed over by the external parsers.

use anyhow::Context;
use chkgate_domain::ConfigurationError;
use chkgate_domain::model::{Evidence, Finding};
use chkgate_types::ids::SCHEMA_EVIDENCE_V1;
use chkgate_types::{CheckType, SourcePath};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
struct EvidenceDoc {
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    findings: Option<Vec<FindingJson>>,
    #[serde(default)]
    violations: Option<Vec<FindingJson>>,
    #[serde(default)]
    passes: Option<Vec<FindingJson>>,
}

#[derive(Debug, Deserialize)]
struct FindingJson {
    identifier: String,
    #[serde(default)]
    line_number: Option<u32>,
    #[serde(default)]
    source_path: Option<String>,
    #[serde(default)]
    detail_text: String,
    /// Judgement for status-scoped pattern checks; absent means incorrect.
    #[serde(default)]
    correct: bool,
}

impl FindingJson {
    fn into_finding(self) -> Finding {
        Finding {
            identifier: self.identifier,
            line_number: self.line_number,
            source_path: self.source_path.map(SourcePath::new),
            detail_text: self.detail_text,
        }
    }
}

/// Parsed evidence plus the per-identifier `correct` flags.
#[derive(Clone, Debug)]
pub struct ParsedEvidence {
    pub evidence: Evidence,
    correct: HashMap<String, bool>,
}

impl ParsedEvidence {
    /// The first finding reported for `identifier` decides.
    pub fn is_correct(&self, identifier: &str) -> bool {
        self.correct.get(identifier).copied().unwrap_or(false)
    }
}

/// Parse evidence for a check of type `check_type`.
///
/// A document with no finding lists is empty evidence of the expected shape.
pub fn parse_evidence_json(text: &str, check_type: CheckType) -> anyhow::Result<ParsedEvidence> {
    if text.trim().is_empty() {
        return Err(ConfigurationError::MissingInput("evidence".to_string()).into());
    }
    let doc: EvidenceDoc = serde_json::from_str(text).context("parse evidence json")?;

    if let Some(schema) = doc.schema.as_deref()
        && schema != SCHEMA_EVIDENCE_V1
    {
        anyhow::bail!("unknown evidence schema: {schema} (expected {SCHEMA_EVIDENCE_V1})");
    }

    let scoped = doc.findings.is_some();
    let split = doc.violations.is_some() || doc.passes.is_some();
    let mismatch = |expected: &str| ConfigurationError::EvidenceMismatch {
        check_type,
        expected: expected.to_string(),
    };

    let mut correct = HashMap::new();
    let mut convert = |items: Option<Vec<FindingJson>>| -> Vec<Finding> {
        items
            .unwrap_or_default()
            .into_iter()
            .map(|f| {
                correct.entry(f.identifier.clone()).or_insert(f.correct);
                f.into_finding()
            })
            .collect()
    };

    let evidence = if check_type.uses_patterns() {
        if split {
            return Err(mismatch("scoped").into());
        }
        Evidence::Scoped(convert(doc.findings))
    } else {
        if scoped {
            return Err(mismatch("split").into());
        }
        let violations = convert(doc.violations);
        let passes = convert(doc.passes);
        Evidence::Split { violations, passes }
    };

    Ok(ParsedEvidence { evidence, correct })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_evidence_keeps_locations() {
        let parsed = parse_evidence_json(
            r#"{
                "schema": "chkgate.evidence.v1",
                "findings": [
                    {"identifier": "CLK_A", "line_number": 12, "source_path": "./sta/clocks.rpt", "correct": true},
                    {"identifier": "CLK_X"}
                ]
            }"#,
            CheckType::PatternSearch,
        )
        .expect("valid evidence");

        let Evidence::Scoped(findings) = &parsed.evidence else {
            panic!("expected scoped evidence");
        };
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line_number, Some(12));
        assert_eq!(
            findings[0].source_path.as_ref().map(|p| p.as_str()),
            Some("sta/clocks.rpt")
        );
        assert!(parsed.is_correct("CLK_A"));
        assert!(!parsed.is_correct("CLK_X"));
        assert!(!parsed.is_correct("CLK_B"));
    }

    #[test]
    fn split_evidence_for_boolean_types() {
        let parsed = parse_evidence_json(
            r#"{"violations": [{"identifier": "NET_A"}]}"#,
            CheckType::BooleanWaiver,
        )
        .expect("valid evidence");
        assert_eq!(
            parsed.evidence,
            Evidence::Split {
                violations: vec![Finding::new("NET_A")],
                passes: Vec::new(),
            }
        );
    }

    #[test]
    fn wrong_shape_is_a_configuration_error() {
        let err = parse_evidence_json(r#"{"findings": []}"#, CheckType::Boolean)
            .expect_err("mismatch");
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::EvidenceMismatch { .. })
        ));

        let err = parse_evidence_json(
            r#"{"findings": [], "passes": []}"#,
            CheckType::PatternWaiver,
        )
        .expect_err("both shapes");
        assert_eq!(err.to_string(), "Type 3 expects scoped evidence");
    }

    #[test]
    fn empty_document_is_empty_evidence() {
        let parsed = parse_evidence_json("{}", CheckType::PatternSearch).expect("valid");
        assert_eq!(parsed.evidence, Evidence::Scoped(Vec::new()));
    }

    #[test]
    fn empty_text_is_missing_input() {
        let err = parse_evidence_json("", CheckType::Boolean).expect_err("missing");
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::MissingInput(_))
        ));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        assert!(parse_evidence_json(r#"{"schema": "other.v9"}"#, CheckType::Boolean).is_err());
    }
}
