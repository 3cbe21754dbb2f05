use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Check configuration schema v1 (`chkgate.check.v1`).
///
/// This is a *user-facing* model: counts accept integers or strings, and every table is optional
/// so that resolution can report precise errors instead of serde's.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfigV1 {
    /// Optional schema string for tooling (`chkgate.check.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub checker: CheckerConfig,

    #[serde(default)]
    pub requirements: RequirementsConfig,

    #[serde(default)]
    pub waivers: WaiversConfig,
}

/// Per-checker declaration: identity, scoping sub-mode and waiver match predicate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pattern scoping: `existence` (default) or `status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// `exact` (default), `case_insensitive`, `normalized`, `view` or `glob`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiver_match: Option<String>,

    /// Single character separating a view from the rest of an identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_separator: Option<String>,

    #[serde(default)]
    pub descriptions: DescriptionOverrides,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DescriptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waived_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waived_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waived_as_info_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waive_comment_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waive_comment_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RequirementsConfig {
    /// Declared pattern count, or `"N/A"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CountValue>,

    #[serde(default)]
    pub pattern_items: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WaiversConfig {
    /// Absent or `"N/A"`: no waivers. `0`: forced pass. `> 0`: selective waivers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CountValue>,

    #[serde(default)]
    pub waive_items: Vec<WaiveItem>,
}

/// A count as written by the user; validated during resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CountValue {
    Number(i64),
    Text(String),
}

/// A `waive_items` entry: a bare string or a `{ name, reason }` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum WaiveItem {
    Text(String),
    Entry {
        name: String,
        #[serde(default)]
        reason: String,
    },
}
