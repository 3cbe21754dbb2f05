use anyhow::Context;
use chkgate_render::{
    RenderableCheck, RenderableGroup, RenderableItem, RenderableSeverity, RenderableStatus,
};
use chkgate_types::{CheckReport, SCHEMA_RESULT_V1, Severity, Status};

pub fn parse_report_json(text: &str) -> anyhow::Result<CheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_RESULT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_RESULT_V1})");
    }

    serde_json::from_value(value).context("parse chkgate result")
}

pub fn serialize_report(report: &CheckReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CheckReport) -> RenderableCheck {
    let result = &report.result;
    RenderableCheck {
        check_id: report.check.id.clone(),
        description: report.check.description.clone(),
        status: match (result.status(), result.waived()) {
            (Status::Fail, _) => RenderableStatus::Fail,
            (Status::Pass, true) => RenderableStatus::PassWaived,
            (Status::Pass, false) => RenderableStatus::Pass,
        },
        groups: result
            .groups()
            .iter()
            .map(|g| RenderableGroup {
                label: g.label.clone(),
                severity: renderable_severity(g.severity),
                description: g.description.clone(),
                items: g.items.clone(),
            })
            .collect(),
        items: result
            .details()
            .iter()
            .map(|d| RenderableItem {
                severity: renderable_severity(d.severity),
                name: d.name.clone(),
                reason: d.reason.clone(),
                line: d.line_number,
                path: d.source_path.as_ref().map(|p| p.as_str().to_string()),
            })
            .collect(),
        warnings: report.config_warnings.clone(),
    }
}

fn renderable_severity(severity: Severity) -> RenderableSeverity {
    match severity {
        Severity::Error => RenderableSeverity::Error,
        Severity::Warn => RenderableSeverity::Warn,
        Severity::Info => RenderableSeverity::Info,
    }
}
