//! Selective waiver resolution and the match predicates checkers plug into it.

use crate::config::NamedWaiver;
use crate::error::ConfigurationError;
use crate::model::Finding;
use globset::{Glob, GlobMatcher};
use std::collections::HashMap;

/// Decides whether a waiver name covers a violation identifier.
///
/// Implementations must be pure: the resolver may call them many times, in any order.
pub trait WaiverMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool;
}

impl<F> WaiverMatch for F
where
    F: Fn(&str, &str) -> bool,
{
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        self(violation, waiver)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatch;

impl WaiverMatch for ExactMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        violation == waiver
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitiveMatch;

impl WaiverMatch for CaseInsensitiveMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        violation.to_lowercase() == waiver.to_lowercase()
    }
}

/// Treats `A = B`, `A=B` and `A to B` as the same name.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedMatch;

impl NormalizedMatch {
    pub fn normalize(s: &str) -> String {
        s.replace('=', " = ")
            .split_whitespace()
            .map(|token| if token == "to" { "=" } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl WaiverMatch for NormalizedMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        Self::normalize(violation) == Self::normalize(waiver)
    }
}

/// A waiver named after a view covers every identifier scoped to that view.
#[derive(Clone, Copy, Debug)]
pub struct ViewScopedMatch {
    pub separator: char,
}

impl Default for ViewScopedMatch {
    fn default() -> Self {
        Self { separator: '/' }
    }
}

impl WaiverMatch for ViewScopedMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        violation == waiver
            || violation
                .strip_prefix(waiver)
                .is_some_and(|rest| rest.starts_with(self.separator))
    }
}

/// Waiver names are glob patterns (case-sensitive).
#[derive(Clone, Debug, Default)]
pub struct GlobMatch {
    matchers: HashMap<String, GlobMatcher>,
}

impl GlobMatch {
    /// Compile every waiver name up front so a bad pattern fails at load time.
    pub fn new<'a, I>(patterns: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut matchers = HashMap::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigurationError::InvalidWaiverPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            matchers.insert(pattern.to_string(), glob.compile_matcher());
        }
        Ok(Self { matchers })
    }
}

impl WaiverMatch for GlobMatch {
    fn matches(&self, violation: &str, waiver: &str) -> bool {
        match self.matchers.get(waiver) {
            Some(m) => m.is_match(violation),
            None => violation == waiver,
        }
    }
}

/// The built-in predicates a checker can declare by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchKind {
    #[default]
    Exact,
    CaseInsensitive,
    Normalized,
    ViewScoped {
        separator: char,
    },
    Glob,
}

impl MatchKind {
    pub const NAMES: &'static str = "exact|case_insensitive|normalized|view|glob";

    pub fn parse(name: &str, separator: char) -> Option<Self> {
        match name {
            "exact" => Some(MatchKind::Exact),
            "case_insensitive" => Some(MatchKind::CaseInsensitive),
            "normalized" => Some(MatchKind::Normalized),
            "view" => Some(MatchKind::ViewScoped { separator }),
            "glob" => Some(MatchKind::Glob),
            _ => None,
        }
    }

    /// Build the predicate; glob patterns are taken from the waiver names.
    pub fn build(
        self,
        entries: &[NamedWaiver],
    ) -> Result<Box<dyn WaiverMatch + Send + Sync>, ConfigurationError> {
        Ok(match self {
            MatchKind::Exact => Box::new(ExactMatch),
            MatchKind::CaseInsensitive => Box::new(CaseInsensitiveMatch),
            MatchKind::Normalized => Box::new(NormalizedMatch),
            MatchKind::ViewScoped { separator } => Box::new(ViewScopedMatch { separator }),
            MatchKind::Glob => Box::new(GlobMatch::new(entries.iter().map(|w| w.name.as_str()))?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaivedViolation {
    pub finding: Finding,
    /// Name of the first waiver entry that matched.
    pub waiver: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaiverOutcome {
    pub waived: Vec<WaivedViolation>,
    pub unwaived: Vec<Finding>,
    pub unused: Vec<NamedWaiver>,
}

/// Split violations into waived/unwaived and report waiver entries nothing matched.
///
/// The first matching entry wins and is the only one marked as used for that violation.
pub fn resolve_waivers(
    violations: &[Finding],
    entries: &[NamedWaiver],
    matcher: &dyn WaiverMatch,
) -> WaiverOutcome {
    let mut used = vec![false; entries.len()];
    let mut outcome = WaiverOutcome::default();

    for violation in violations {
        let hit = entries
            .iter()
            .position(|w| matcher.matches(&violation.identifier, &w.name));
        match hit {
            Some(idx) => {
                used[idx] = true;
                outcome.waived.push(WaivedViolation {
                    finding: violation.clone(),
                    waiver: entries[idx].name.clone(),
                    reason: entries[idx].reason.clone(),
                });
            }
            None => outcome.unwaived.push(violation.clone()),
        }
    }

    outcome.unused = entries
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(w, _)| w.clone())
        .collect();

    outcome
}
