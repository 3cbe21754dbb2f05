//! The `check` use case: resolve the configuration, evaluate evidence and produce a report.

use anyhow::Context;
use chkgate_domain::CheckContext;
use chkgate_domain::classify::Scoping;
use chkgate_domain::model::Finding;
use chkgate_settings::{ResolvedConfig, ScopingMode};
use chkgate_types::{CheckMeta, CheckReport, CheckResult, SCHEMA_RESULT_V1, Status, ToolMeta, ids};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::evidence::parse_evidence_json;

/// Input for the check use case.
#[derive(Clone, Copy, Debug)]
pub struct CheckInput<'a> {
    /// Check configuration contents (TOML).
    pub config_text: &'a str,
    /// Evidence contents (JSON) produced by the external parser.
    pub evidence_text: &'a str,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: CheckReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case. Configuration problems are errors, never a FAIL report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved =
        chkgate_settings::load_config(input.config_text).context("load check configuration")?;
    debug!(
        check_id = %resolved.checker.id,
        check_type = %resolved.check_type,
        "configuration resolved"
    );

    let parsed =
        parse_evidence_json(input.evidence_text, resolved.check_type).context("read evidence")?;

    let matcher = resolved
        .checker
        .match_kind
        .build(&resolved.model.waivers.named())
        .context("build waiver matcher")?;

    let is_correct = |f: &Finding| parsed.is_correct(&f.identifier);
    let scoping = match resolved.checker.mode {
        ScopingMode::Existence => Scoping::Existence,
        ScopingMode::Status => Scoping::Status(&is_correct),
    };

    let ctx = CheckContext {
        check_id: &resolved.checker.id,
        descriptions: Some(&resolved.checker.descriptions),
        scoping,
        matcher: &*matcher,
    };
    let evaluation = chkgate_domain::evaluate(&resolved.model, &parsed.evidence, &ctx)
        .context("evaluate check")?;

    let finished_at = OffsetDateTime::now_utc();

    let report = CheckReport {
        schema: SCHEMA_RESULT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        check: CheckMeta {
            id: resolved.checker.id.clone(),
            description: resolved.checker.description.clone(),
            check_type: evaluation.check_type,
        },
        result: evaluation.result,
        summary: evaluation.counts,
        config_warnings: resolved.warnings.clone(),
    };
    info!(
        check_id = %report.check.id,
        status = report.result.status_label(),
        "check evaluated"
    );

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map the result to an exit code: 0 = PASS (waived or not), 2 = FAIL.
pub fn status_exit_code(result: &CheckResult) -> i32 {
    match result.status() {
        Status::Pass => 0,
        Status::Fail => 2,
    }
}
