use crate::classify::Classification;
use crate::status::Verdict;
use crate::waiver::WaiverOutcome;
use chkgate_types::{BucketCounts, CheckResult, CheckType};

/// Everything one check invocation produced.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub check_type: CheckType,
    pub classification: Classification,
    /// Present only in selective waiver mode.
    pub waivers: Option<WaiverOutcome>,
    pub verdict: Verdict,
    pub result: CheckResult,
    pub counts: BucketCounts,
}

pub fn count_buckets(
    classification: &Classification,
    waivers: Option<&WaiverOutcome>,
    waive_comments: usize,
) -> BucketCounts {
    let n = |len: usize| len as u32;
    let mut counts = BucketCounts {
        found: n(classification.satisfied().len()),
        extra: n(classification.extra().len()),
        waive_comments: n(waive_comments),
        ..BucketCounts::default()
    };
    match classification {
        Classification::Pattern(p) => counts.missing = n(p.missing.len()),
        Classification::Boolean(b) => counts.violations = n(b.violations.len()),
    }
    if let Some(w) = waivers {
        counts.waived = n(w.waived.len());
        counts.unwaived = n(w.unwaived.len());
        counts.unused_waivers = n(w.unused.len());
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{BooleanPartition, PatternPartition};
    use crate::model::Finding;
    use crate::test_support::findings;
    use crate::waiver::WaivedViolation;

    #[test]
    fn boolean_violations_are_not_counted_as_missing() {
        let classification = Classification::Boolean(BooleanPartition {
            violations: findings(&["NET_A", "NET_B"]),
            passes: findings(&["NET_OK"]),
        });
        let waivers = WaiverOutcome {
            waived: vec![WaivedViolation {
                finding: Finding::new("NET_A"),
                waiver: "NET_A".to_string(),
                reason: "legacy".to_string(),
            }],
            unwaived: findings(&["NET_B"]),
            unused: Vec::new(),
        };

        let counts = count_buckets(&classification, Some(&waivers), 0);
        assert_eq!(counts.violations, 2);
        assert_eq!(counts.missing, 0);
        assert_eq!(counts.found, 1);
        assert_eq!(counts.waived + counts.unwaived, counts.violations);
    }

    #[test]
    fn pattern_misses_are_not_counted_as_violations() {
        let classification = Classification::Pattern(PatternPartition {
            found: findings(&["CLK_A"]),
            missing: findings(&["CLK_B"]),
            extra: findings(&["CLK_X"]),
        });
        let counts = count_buckets(&classification, None, 0);
        assert_eq!(
            (counts.found, counts.missing, counts.violations, counts.extra),
            (1, 1, 0, 1)
        );
    }
}
