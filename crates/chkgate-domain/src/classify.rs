//! Partition findings into the buckets the evaluation Type calls for.

use crate::config::Requirements;
use crate::error::ConfigurationError;
use crate::model::{Evidence, Finding};
use chkgate_types::CheckType;
use std::collections::{HashMap, HashSet};

/// How a pattern checker judges the pattern items it finds.
///
/// Declared once per checker, never inferred from the findings.
#[derive(Clone, Copy, Default)]
pub enum Scoping<'a> {
    /// A pattern item is satisfied when a finding with that identifier exists.
    #[default]
    Existence,
    /// Only pattern items that were found are judged, by the given predicate.
    /// Pattern items with no finding are omitted.
    Status(&'a dyn Fn(&Finding) -> bool),
}

impl std::fmt::Debug for Scoping<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scoping::Existence => f.write_str("Existence"),
            Scoping::Status(_) => f.write_str("Status(..)"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternPartition {
    pub found: Vec<Finding>,
    pub missing: Vec<Finding>,
    pub extra: Vec<Finding>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BooleanPartition {
    pub violations: Vec<Finding>,
    pub passes: Vec<Finding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Types 2/3.
    Pattern(PatternPartition),
    /// Types 1/4.
    Boolean(BooleanPartition),
}

impl Classification {
    /// `missing` for pattern checks, `violations` for boolean checks.
    pub fn violations(&self) -> &[Finding] {
        match self {
            Classification::Pattern(p) => &p.missing,
            Classification::Boolean(b) => &b.violations,
        }
    }

    /// `found` for pattern checks, `passes` for boolean checks.
    pub fn satisfied(&self) -> &[Finding] {
        match self {
            Classification::Pattern(p) => &p.found,
            Classification::Boolean(b) => &b.passes,
        }
    }

    /// Findings outside the declared pattern scope (always empty for boolean checks).
    pub fn extra(&self) -> &[Finding] {
        match self {
            Classification::Pattern(p) => &p.extra,
            Classification::Boolean(_) => &[],
        }
    }
}

/// Route evidence to the partition matching `check_type`.
pub fn classify(
    check_type: CheckType,
    evidence: &Evidence,
    requirements: &Requirements,
    scoping: Scoping<'_>,
) -> Result<Classification, ConfigurationError> {
    match (check_type.uses_patterns(), evidence) {
        (true, Evidence::Scoped(findings)) => Ok(Classification::Pattern(classify_patterns(
            findings,
            &requirements.pattern_items,
            scoping,
        ))),
        (false, Evidence::Split { violations, passes }) => {
            Ok(Classification::Boolean(classify_boolean(violations, passes)))
        }
        (true, Evidence::Split { .. }) => Err(ConfigurationError::EvidenceMismatch {
            check_type,
            expected: "scoped".to_string(),
        }),
        (false, Evidence::Scoped(_)) => Err(ConfigurationError::EvidenceMismatch {
            check_type,
            expected: "split".to_string(),
        }),
    }
}

/// Types 2/3: `found`/`missing` follow `pattern_items` order, `extra` follows finding order.
pub fn classify_patterns(
    findings: &[Finding],
    pattern_items: &[String],
    scoping: Scoping<'_>,
) -> PatternPartition {
    let present = dedup(findings);
    let by_id: HashMap<&str, &Finding> = present
        .iter()
        .map(|f| (f.identifier.as_str(), f))
        .collect();

    let mut partition = PatternPartition::default();
    let mut scope: HashSet<&str> = HashSet::new();

    for pattern in pattern_items {
        if !scope.insert(pattern.as_str()) {
            continue;
        }
        match (by_id.get(pattern.as_str()).copied(), scoping) {
            (Some(f), Scoping::Existence) => partition.found.push(f.clone()),
            (Some(f), Scoping::Status(is_correct)) => {
                if is_correct(f) {
                    partition.found.push(f.clone());
                } else {
                    partition.missing.push(f.clone());
                }
            }
            (None, Scoping::Existence) => partition.missing.push(Finding::new(pattern.clone())),
            (None, Scoping::Status(_)) => {}
        }
    }

    partition.extra = present
        .into_iter()
        .filter(|f| !scope.contains(f.identifier.as_str()))
        .collect();

    partition
}

/// Types 1/4: forward the parser's split. An identifier reported both ways counts as a violation.
pub fn classify_boolean(violations: &[Finding], passes: &[Finding]) -> BooleanPartition {
    let violations = dedup(violations);
    let bad: HashSet<&str> = violations.iter().map(|f| f.identifier.as_str()).collect();
    let passes = dedup(passes)
        .into_iter()
        .filter(|f| !bad.contains(f.identifier.as_str()))
        .collect();

    BooleanPartition { violations, passes }
}

/// Collapse repeated identifiers; the first occurrence keeps its location.
fn dedup(findings: &[Finding]) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .iter()
        .filter(|f| seen.insert(f.identifier.as_str()))
        .cloned()
        .collect()
}
