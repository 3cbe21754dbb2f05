use crate::{SourcePath, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::OffsetDateTime;

/// Stable schema identifier for chkgate results.
pub const SCHEMA_RESULT_V1: &str = "chkgate.result.v1";

/// Severity of an output group and of every detail item inside it.
///
/// Declaration order is the fixed category order of the output: ERROR, WARN, INFO.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl Severity {
    pub fn group_prefix(self) -> &'static str {
        match self {
            Severity::Error => ids::GROUP_PREFIX_ERROR,
            Severity::Warn => ids::GROUP_PREFIX_WARN,
            Severity::Info => ids::GROUP_PREFIX_INFO,
        }
    }

    /// Title-case name used by the report view (`Error`, `Warn`, `Info`).
    pub fn title(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warn => "Warn",
            Severity::Info => "Info",
        }
    }

    fn slot(self) -> usize {
        match self {
            Severity::Error => 0,
            Severity::Warn => 1,
            Severity::Info => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

/// The four evaluation modes a check configuration can select.
///
/// Serialized as its number (`1`..=`4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CheckType {
    /// Type 1: plain boolean check, no waiver support.
    Boolean,
    /// Type 2: pattern search, no waiver support.
    PatternSearch,
    /// Type 3: pattern search with selective waivers.
    PatternWaiver,
    /// Type 4: boolean check with selective waivers.
    BooleanWaiver,
}

impl CheckType {
    pub const ALL: [CheckType; 4] = [
        CheckType::Boolean,
        CheckType::PatternSearch,
        CheckType::PatternWaiver,
        CheckType::BooleanWaiver,
    ];

    pub fn number(self) -> u8 {
        match self {
            CheckType::Boolean => 1,
            CheckType::PatternSearch => 2,
            CheckType::PatternWaiver => 3,
            CheckType::BooleanWaiver => 4,
        }
    }

    pub fn uses_patterns(self) -> bool {
        matches!(self, CheckType::PatternSearch | CheckType::PatternWaiver)
    }

    pub fn uses_selective_waivers(self) -> bool {
        matches!(self, CheckType::PatternWaiver | CheckType::BooleanWaiver)
    }
}

impl From<CheckType> for u8 {
    fn from(value: CheckType) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for CheckType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CheckType::Boolean),
            2 => Ok(CheckType::PatternSearch),
            3 => Ok(CheckType::PatternWaiver),
            4 => Ok(CheckType::BooleanWaiver),
            other => Err(format!("unknown check type: {other} (expected 1..=4)")),
        }
    }
}

impl std::fmt::Display for CheckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type {}", self.number())
    }
}

/// One rendered item: the per-identifier record behind a group entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailItem {
    /// Identical to the entry this item backs in its group's `items`.
    pub name: String,
    pub severity: Severity,
    /// Label of the group that lists `name` (`ERROR01`, `INFO02`, ...).
    pub group: String,
    /// Justification text, including any tag suffix.
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<SourcePath>,
    /// Free-form text the parser attached to the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Stable identifier intended for dedup and trending across runs.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResultGroup {
    pub label: String,
    pub severity: Severity,
    pub description: String,
    pub items: Vec<String>,
}

/// Verdict plus the grouped "log" structure and the per-item "report" structure.
///
/// Built through [`ResultBuilder`], so every group entry has exactly one
/// detail item with the same name and group label. A deserialized result is
/// checked against the same rule before it is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawCheckResult")]
pub struct CheckResult {
    status: Status,
    waived: bool,
    groups: Vec<ResultGroup>,
    details: Vec<DetailItem>,
}

/// Wire shape of [`CheckResult`] before the group/detail checks.
#[derive(Deserialize, JsonSchema)]
struct RawCheckResult {
    status: Status,
    waived: bool,
    groups: Vec<ResultGroup>,
    details: Vec<DetailItem>,
}

impl TryFrom<RawCheckResult> for CheckResult {
    type Error = String;

    fn try_from(raw: RawCheckResult) -> Result<Self, Self::Error> {
        let mut labels = HashSet::new();
        for group in &raw.groups {
            if !labels.insert(group.label.as_str()) {
                return Err(format!("group {} appears twice", group.label));
            }

            let details: Vec<&DetailItem> =
                raw.details.iter().filter(|d| d.group == group.label).collect();
            let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
            let items: Vec<&str> = group.items.iter().map(String::as_str).collect();
            if names != items {
                return Err(format!(
                    "group {} lists {items:?} but its detail items are {names:?}",
                    group.label
                ));
            }
            if let Some(d) = details.iter().find(|d| d.severity != group.severity) {
                return Err(format!(
                    "detail item {} has a different severity than group {}",
                    d.name, group.label
                ));
            }
        }

        if let Some(d) = raw.details.iter().find(|d| !labels.contains(d.group.as_str())) {
            return Err(format!(
                "detail item {} refers to missing group {}",
                d.name, d.group
            ));
        }

        let has_error_group = raw.groups.iter().any(|g| g.severity == Severity::Error);
        if has_error_group != (raw.status == Status::Fail) {
            return Err(format!(
                "status {:?} does not agree with the groups (error group present: {has_error_group})",
                raw.status
            ));
        }

        Ok(CheckResult {
            status: raw.status,
            waived: raw.waived,
            groups: raw.groups,
            details: raw.details,
        })
    }
}

impl CheckResult {
    pub fn status(&self) -> Status {
        self.status
    }

    /// True when a PASS was reached through waivers (selective or forced-pass).
    pub fn waived(&self) -> bool {
        self.waived
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn details(&self) -> &[DetailItem] {
        &self.details
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn status_label(&self) -> &'static str {
        match (self.status, self.waived) {
            (Status::Fail, _) => ids::STATUS_LABEL_FAIL,
            (Status::Pass, true) => ids::STATUS_LABEL_PASS_WAIVED,
            (Status::Pass, false) => ids::STATUS_LABEL_PASS,
        }
    }

    pub fn group(&self, label: &str) -> Option<&ResultGroup> {
        self.groups.iter().find(|g| g.label == label)
    }

    pub fn details_in<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DetailItem> + 'a {
        self.details.iter().filter(move |d| d.group == label)
    }
}

/// Handle to a group opened on a [`ResultBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupId(usize);

/// A detail item before its group label is known.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub reason: String,
    pub line_number: Option<u32>,
    pub source_path: Option<SourcePath>,
    pub detail: Option<String>,
    pub fingerprint: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
struct PendingGroup {
    severity: Severity,
    description: String,
    items: Vec<ItemDraft>,
}

/// Accumulates groups and their items, then lays them out in category order.
///
/// Group entries and detail items are produced by the same loop in [`ResultBuilder::finish`].
#[derive(Clone, Debug, Default)]
pub struct ResultBuilder {
    groups: Vec<PendingGroup>,
}

impl ResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&mut self, severity: Severity, description: impl Into<String>) -> GroupId {
        self.groups.push(PendingGroup {
            severity,
            description: description.into(),
            items: Vec::new(),
        });
        GroupId(self.groups.len() - 1)
    }

    pub fn severity_of(&self, group: GroupId) -> Option<Severity> {
        self.groups.get(group.0).map(|g| g.severity)
    }

    pub fn push(&mut self, group: GroupId, item: ItemDraft) {
        if let Some(g) = self.groups.get_mut(group.0) {
            g.items.push(item);
        }
    }

    /// Drop empty groups, order by severity (stable within a severity) and number the labels.
    pub fn finish(self, status: Status, waived: bool) -> CheckResult {
        let mut pending: Vec<PendingGroup> = self
            .groups
            .into_iter()
            .filter(|g| !g.items.is_empty())
            .collect();
        pending.sort_by_key(|g| g.severity);

        let mut counters = [0u32; 3];
        let mut groups = Vec::with_capacity(pending.len());
        let mut details = Vec::new();

        for g in pending {
            let slot = g.severity.slot();
            counters[slot] += 1;
            let label = format!("{}{:02}", g.severity.group_prefix(), counters[slot]);

            let mut items = Vec::with_capacity(g.items.len());
            for draft in g.items {
                items.push(draft.name.clone());
                details.push(DetailItem {
                    name: draft.name,
                    severity: g.severity,
                    group: label.clone(),
                    reason: draft.reason,
                    line_number: draft.line_number,
                    source_path: draft.source_path,
                    detail: draft.detail,
                    fingerprint: draft.fingerprint,
                });
            }

            groups.push(ResultGroup {
                label,
                severity: g.severity,
                description: g.description,
                items,
            });
        }

        CheckResult {
            status,
            waived,
            groups,
            details,
        }
    }
}

/// Per-bucket counts of one evaluation.
///
/// `waived + unwaived` partitions `missing` for Type 3 and `violations` for Type 4.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BucketCounts {
    /// Pattern items found (Types 2/3) or passing identifiers (Types 1/4).
    pub found: u32,
    /// Pattern items not satisfied (Types 2/3 only).
    pub missing: u32,
    /// Identifiers the parser reported as violations (Types 1/4 only).
    pub violations: u32,
    pub extra: u32,
    pub waived: u32,
    pub unwaived: u32,
    pub unused_waivers: u32,
    pub waive_comments: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckMeta {
    pub id: String,
    pub description: String,
    #[schemars(with = "u8")]
    pub check_type: CheckType,
}

/// Result envelope written by the CLI and read back by the renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub check: CheckMeta,
    #[serde(flatten)]
    pub result: CheckResult,
    pub summary: BucketCounts,
    /// Soft validation mismatches found while loading the configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_warnings: Vec<String>,
}
