use crate::assemble::assemble;
use crate::classify::{Scoping, classify};
use crate::config::{ConfigModel, WaiverMode};
use crate::descriptions::Descriptions;
use crate::error::ConfigurationError;
use crate::model::Evidence;
use crate::report::{Evaluation, count_buckets};
use crate::resolve::resolve_type;
use crate::status::resolve_status;
use crate::waiver::{ExactMatch, WaiverMatch, resolve_waivers};
use tracing::{debug, warn};

/// Per-checker inputs that are not part of the configuration file.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub check_id: &'a str,
    /// `None` uses the defaults for the resolved Type.
    pub descriptions: Option<&'a Descriptions>,
    pub scoping: Scoping<'a>,
    pub matcher: &'a dyn WaiverMatch,
}

impl<'a> CheckContext<'a> {
    pub fn new(check_id: &'a str) -> Self {
        Self {
            check_id,
            descriptions: None,
            scoping: Scoping::Existence,
            matcher: &ExactMatch,
        }
    }
}

/// Run one check: Type resolution, classification, waivers, status, output assembly.
///
/// Stateless; independent invocations never observe each other.
pub fn evaluate(
    config: &ConfigModel,
    evidence: &Evidence,
    ctx: &CheckContext<'_>,
) -> Result<Evaluation, ConfigurationError> {
    for warning in config.validate()? {
        warn!(check_id = ctx.check_id, "{warning}");
    }

    let check_type = resolve_type(&config.requirements, &config.waivers);
    let mode = config.waivers.mode();
    debug!(check_id = ctx.check_id, %check_type, ?mode, "resolved evaluation type");

    let classification = classify(check_type, evidence, &config.requirements, ctx.scoping)?;

    let waivers = (mode == WaiverMode::Selective).then(|| {
        resolve_waivers(
            classification.violations(),
            &config.waivers.named(),
            ctx.matcher,
        )
    });

    let verdict = resolve_status(&classification, waivers.as_ref(), mode);
    debug!(
        check_id = ctx.check_id,
        status = ?verdict.status,
        waived = verdict.waived,
        "resolved status"
    );

    let defaults;
    let descriptions = match ctx.descriptions {
        Some(d) => d,
        None => {
            defaults = Descriptions::defaults_for(check_type);
            &defaults
        }
    };

    let result = assemble(
        ctx.check_id,
        &classification,
        &config.waivers,
        waivers.as_ref(),
        verdict,
        descriptions,
    );

    let waive_comments = match mode {
        WaiverMode::ForcedPass => config.waivers.waive_items.len(),
        _ => 0,
    };
    let counts = count_buckets(&classification, waivers.as_ref(), waive_comments);

    Ok(Evaluation {
        check_type,
        classification,
        waivers,
        verdict,
        result,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NamedWaiver, Requirements, WaiverConfig};
    use crate::model::Finding;
    use crate::test_support::{boolean_config, findings, pattern_config, split};
    use crate::waiver::CaseInsensitiveMatch;
    use chkgate_types::{CheckType, Severity, Status};

    #[test]
    fn type1_violation_fails_with_one_error_group() {
        let cfg = boolean_config(WaiverConfig::disabled());
        let eval = evaluate(&cfg, &split(&["NET_A"], &[]), &CheckContext::new("CHK")).expect("ok");

        assert_eq!(eval.check_type, CheckType::Boolean);
        assert_eq!(eval.result.status(), Status::Fail);
        assert_eq!(eval.result.groups().len(), 1);
        assert_eq!(eval.result.groups()[0].label, "ERROR01");
        assert_eq!(eval.result.groups()[0].items, vec!["NET_A"]);
    }

    #[test]
    fn type1_forced_pass_reports_everything_as_info() {
        let cfg = boolean_config(WaiverConfig::forced_pass(["debug note"]));
        let eval = evaluate(&cfg, &split(&["NET_A"], &[]), &CheckContext::new("CHK")).expect("ok");

        assert_eq!(eval.check_type, CheckType::Boolean);
        assert_eq!(eval.result.status(), Status::Pass);
        assert!(eval.result.waived());
        assert!(
            eval.result
                .details()
                .iter()
                .all(|d| d.severity == Severity::Info)
        );
        let reasons: Vec<(&str, &str)> = eval
            .result
            .details()
            .iter()
            .map(|d| (d.name.as_str(), d.reason.as_str()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("debug note", "Waiver comment[WAIVED_INFO]"),
                ("NET_A", "Violation found[WAIVED_AS_INFO]"),
            ]
        );
        assert_eq!(eval.counts.waive_comments, 1);
    }

    #[test]
    fn type2_missing_pattern_fails() {
        let cfg = pattern_config(&["CLK_A", "CLK_B"], WaiverConfig::disabled());
        let evidence = Evidence::Scoped(findings(&["CLK_A"]));
        let eval = evaluate(&cfg, &evidence, &CheckContext::new("CHK")).expect("ok");

        assert_eq!(eval.check_type, CheckType::PatternSearch);
        assert_eq!(eval.classification.satisfied()[0].identifier, "CLK_A");
        assert_eq!(eval.classification.violations()[0].identifier, "CLK_B");
        assert_eq!(eval.result.status(), Status::Fail);
    }

    #[test]
    fn type3_waived_pattern_passes_with_waive_flag() {
        let cfg = pattern_config(
            &["CLK_A"],
            WaiverConfig::selective(vec![NamedWaiver::new("CLK_A", "approved")]),
        );
        let eval = evaluate(&cfg, &Evidence::Scoped(Vec::new()), &CheckContext::new("CHK"))
            .expect("ok");

        assert_eq!(eval.check_type, CheckType::PatternWaiver);
        let waivers = eval.waivers.as_ref().expect("selective mode");
        assert_eq!(waivers.waived[0].finding.identifier, "CLK_A");
        assert_eq!(waivers.waived[0].reason, "approved");
        assert!(waivers.unwaived.is_empty());
        assert_eq!(eval.result.status(), Status::Pass);
        assert_eq!(eval.result.status_label(), "PASS(Waive)");
    }

    #[test]
    fn type4_unused_waiver_is_a_warning_and_still_passes() {
        let cfg = boolean_config(WaiverConfig::selective(vec![NamedWaiver::new(
            "X", "reason",
        )]));
        let eval = evaluate(&cfg, &split(&[], &["OK_1"]), &CheckContext::new("CHK")).expect("ok");

        assert_eq!(eval.check_type, CheckType::BooleanWaiver);
        let waivers = eval.waivers.as_ref().expect("selective mode");
        assert_eq!(waivers.unused, vec![NamedWaiver::new("X", "reason")]);
        assert_eq!(eval.result.status(), Status::Pass);
        assert!(!eval.result.waived());
        assert_eq!(eval.result.groups()[0].label, "WARN01");
        assert_eq!(eval.result.groups()[0].items, vec!["X"]);
    }

    #[test]
    fn custom_matcher_and_descriptions_flow_through() {
        let cfg = boolean_config(WaiverConfig::selective(vec![NamedWaiver::new(
            "net_a", "ok",
        )]));
        let mut d = Descriptions::defaults_for(CheckType::BooleanWaiver);
        d.waived_desc = "Approved exceptions".to_string();
        let ctx = CheckContext {
            descriptions: Some(&d),
            matcher: &CaseInsensitiveMatch,
            ..CheckContext::new("CHK")
        };
        let eval = evaluate(&cfg, &split(&["NET_A"], &[]), &ctx).expect("ok");
        assert_eq!(eval.result.status_label(), "PASS(Waive)");
        assert_eq!(eval.result.groups()[0].description, "Approved exceptions");
    }

    #[test]
    fn status_scoping_uses_caller_predicate() {
        let cfg = pattern_config(&["CLK_A", "CLK_B"], WaiverConfig::disabled());
        let evidence = Evidence::Scoped(vec![
            Finding::new("CLK_A").with_detail("propagated"),
            Finding::new("CLK_B").with_detail("ideal"),
        ]);
        let is_propagated = |f: &Finding| f.detail_text == "propagated";
        let ctx = CheckContext {
            scoping: Scoping::Status(&is_propagated),
            ..CheckContext::new("CHK")
        };
        let eval = evaluate(&cfg, &evidence, &ctx).expect("ok");
        assert_eq!(eval.counts.found, 1);
        assert_eq!(eval.counts.missing, 1);
        assert_eq!(
            eval.result.group("ERROR01").map(|g| g.items.clone()),
            Some(vec!["CLK_B".to_string()])
        );
    }

    #[test]
    fn forced_pass_without_comments_aborts() {
        let cfg = ConfigModel {
            requirements: Requirements::default(),
            waivers: WaiverConfig {
                value: Some(0),
                waive_items: Vec::new(),
            },
            description: String::new(),
        };
        let err = evaluate(&cfg, &split(&["NET_A"], &[]), &CheckContext::new("CHK"))
            .expect_err("configuration error");
        assert_eq!(err, ConfigurationError::ForcedPassWithoutComments);
    }
}
