//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Type resolution totality
//! - Partition completeness and disjointness
//! - Forced-pass and selective waiver status
//! - The group entry / detail item correspondence

use crate::classify::{Scoping, classify_boolean, classify_patterns};
use crate::config::{ConfigModel, NamedWaiver, Requirements, WaiverConfig, WaiverMode};
use crate::engine::{CheckContext, evaluate};
use crate::model::{Evidence, Finding};
use crate::resolve::resolve_type;
use crate::waiver::{ExactMatch, resolve_waivers};
use chkgate_types::{CheckType, Severity, Status};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Strategies
// ============================================================================

/// Small identifier alphabet so patterns and findings overlap often.
fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("CLK_A".to_string()),
        Just("CLK_B".to_string()),
        Just("NET_1".to_string()),
        Just("NET_2".to_string()),
        "[A-Z]{1,3}_[0-9]",
    ]
}

fn arb_identifiers(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_identifier(), 0..max)
}

fn arb_findings(max: usize) -> impl Strategy<Value = Vec<Finding>> {
    arb_identifiers(max).prop_map(|ids| ids.into_iter().map(Finding::new).collect())
}

fn arb_waiver_config() -> impl Strategy<Value = WaiverConfig> {
    prop_oneof![
        Just(WaiverConfig::disabled()),
        prop::collection::vec("[a-z ]{1,12}", 1..4)
            .prop_map(|comments| WaiverConfig::forced_pass(comments)),
        prop::collection::vec(arb_identifier(), 1..4).prop_map(|names| {
            WaiverConfig::selective(
                names
                    .into_iter()
                    .map(|n| NamedWaiver::new(n, "approved"))
                    .collect(),
            )
        }),
    ]
}

fn ids(findings: &[Finding]) -> HashSet<String> {
    findings.iter().map(|f| f.identifier.clone()).collect()
}

// ============================================================================
// Type resolution
// ============================================================================

proptest! {
    #[test]
    fn type_resolution_is_total(
        value in prop::option::of(0u32..5),
        items in arb_identifiers(4),
        waivers in arb_waiver_config(),
    ) {
        let reqs = Requirements { value, pattern_items: items.clone() };
        let t = resolve_type(&reqs, &waivers);

        prop_assert!(CheckType::ALL.contains(&t));
        prop_assert_eq!(t.uses_patterns(), !items.is_empty());
        prop_assert_eq!(t.uses_selective_waivers(), waivers.mode() == WaiverMode::Selective);
    }
}

// ============================================================================
// Classification
// ============================================================================

proptest! {
    #[test]
    fn pattern_partition_is_complete_and_disjoint(
        found in arb_findings(8),
        items in arb_identifiers(6),
    ) {
        let p = classify_patterns(&found, &items, Scoping::Existence);

        let pattern_set: HashSet<String> = items.iter().cloned().collect();
        let found_ids = ids(&p.found);
        let missing_ids = ids(&p.missing);
        let extra_ids = ids(&p.extra);

        prop_assert!(found_ids.is_disjoint(&missing_ids));
        prop_assert!(found_ids.is_disjoint(&extra_ids));
        prop_assert!(missing_ids.is_disjoint(&extra_ids));

        let scoped: HashSet<String> = found_ids.union(&missing_ids).cloned().collect();
        prop_assert_eq!(scoped, pattern_set.clone());

        for f in &found {
            prop_assert!(
                pattern_set.contains(&f.identifier) || extra_ids.contains(&f.identifier)
            );
        }
    }

    #[test]
    fn status_partition_judges_only_found_pattern_items(
        found in arb_findings(8),
        items in arb_identifiers(6),
        correct in arb_identifiers(6),
    ) {
        let correct: HashSet<String> = correct.into_iter().collect();
        let is_correct = |f: &Finding| correct.contains(&f.identifier);
        let p = classify_patterns(&found, &items, Scoping::Status(&is_correct));

        let pattern_set: HashSet<String> = items.iter().cloned().collect();
        let present = ids(&found);
        let found_ids = ids(&p.found);
        let missing_ids = ids(&p.missing);

        prop_assert!(found_ids.is_disjoint(&missing_ids));
        let judged: HashSet<String> = found_ids.union(&missing_ids).cloned().collect();
        let expected: HashSet<String> = pattern_set.intersection(&present).cloned().collect();
        prop_assert_eq!(judged, expected);
        prop_assert!(found_ids.iter().all(|id| correct.contains(id)));
        prop_assert!(missing_ids.iter().all(|id| !correct.contains(id)));

        let outside: HashSet<String> = present.difference(&pattern_set).cloned().collect();
        prop_assert_eq!(ids(&p.extra), outside);
    }

    #[test]
    fn boolean_partition_keeps_every_identifier_once(
        violations in arb_findings(6),
        passes in arb_findings(6),
    ) {
        let b = classify_boolean(&violations, &passes);
        let bad = ids(&b.violations);
        let good = ids(&b.passes);

        prop_assert!(bad.is_disjoint(&good));
        prop_assert_eq!(bad.len(), b.violations.len());
        prop_assert_eq!(good.len(), b.passes.len());
        prop_assert_eq!(bad, ids(&violations));
    }
}

// ============================================================================
// Waivers and status
// ============================================================================

proptest! {
    #[test]
    fn waiver_resolution_is_idempotent(
        violations in arb_findings(6),
        names in prop::collection::vec(arb_identifier(), 0..4),
    ) {
        let entries: Vec<NamedWaiver> =
            names.into_iter().map(|n| NamedWaiver::new(n, "r")).collect();
        let first = resolve_waivers(&violations, &entries, &ExactMatch);
        let second = resolve_waivers(&violations, &entries, &ExactMatch);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.waived.len() + first.unwaived.len(), violations.len());

        let waived: HashSet<String> =
            first.waived.iter().map(|w| w.finding.identifier.clone()).collect();
        prop_assert!(waived.is_disjoint(&ids(&first.unwaived)));
    }

    #[test]
    fn forced_pass_always_passes_with_only_info(
        violations in arb_findings(6),
        items in arb_identifiers(4),
        comments in prop::collection::vec("[a-z]{1,8}", 1..3),
    ) {
        let cfg = ConfigModel {
            description: String::new(),
            requirements: Requirements { value: None, pattern_items: items.clone() },
            waivers: WaiverConfig::forced_pass(comments),
        };
        let evidence = if items.is_empty() {
            Evidence::Split { violations, passes: Vec::new() }
        } else {
            Evidence::Scoped(violations)
        };

        let eval = evaluate(&cfg, &evidence, &CheckContext::new("PROP")).expect("valid");
        prop_assert_eq!(eval.result.status(), Status::Pass);
        prop_assert!(eval.result.waived());
        prop_assert!(eval.result.groups().iter().all(|g| g.severity == Severity::Info));
    }

    #[test]
    fn group_entries_match_detail_items(
        violations in arb_findings(6),
        passes in arb_findings(4),
        items in arb_identifiers(4),
        waivers in arb_waiver_config(),
        status_mode in any::<bool>(),
        correct in arb_identifiers(4),
    ) {
        let cfg = ConfigModel {
            description: String::new(),
            requirements: Requirements {
                value: Some(items.len() as u32),
                pattern_items: items.clone(),
            },
            waivers,
        };
        // Pattern checks see every finding; boolean checks get the parser's split.
        let evidence = if items.is_empty() {
            Evidence::Split { violations, passes }
        } else {
            Evidence::Scoped(violations.into_iter().chain(passes).collect())
        };

        let correct: HashSet<String> = correct.into_iter().collect();
        let is_correct = |f: &Finding| correct.contains(&f.identifier);
        let ctx = CheckContext {
            scoping: if status_mode { Scoping::Status(&is_correct) } else { Scoping::Existence },
            ..CheckContext::new("PROP")
        };
        let eval = evaluate(&cfg, &evidence, &ctx).expect("valid");
        prop_assert_eq!(eval.check_type.uses_patterns(), !items.is_empty());

        let mut from_groups = Vec::new();
        for g in eval.result.groups() {
            prop_assert!(!g.items.is_empty());
            for item in &g.items {
                from_groups.push((g.label.clone(), item.clone()));
            }
        }
        let from_details: Vec<(String, String)> = eval
            .result
            .details()
            .iter()
            .map(|d| (d.group.clone(), d.name.clone()))
            .collect();
        prop_assert_eq!(from_groups, from_details);

        let failing = eval.result.groups().iter().any(|g| g.severity == Severity::Error);
        prop_assert_eq!(failing, eval.result.status() == Status::Fail);
    }
}
