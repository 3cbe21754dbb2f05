//! Stable identifiers: schema ids, group label prefixes and reason tag suffixes.
//!
//! Tag suffixes are appended verbatim (no separator) to a detail item's reason.

// Schemas
pub const SCHEMA_CHECK_CONFIG_V1: &str = "chkgate.check.v1";
pub const SCHEMA_EVIDENCE_V1: &str = "chkgate.evidence.v1";

// Group label prefixes, numbered per severity (`ERROR01`, `WARN01`, `INFO02`, ...).
pub const GROUP_PREFIX_ERROR: &str = "ERROR";
pub const GROUP_PREFIX_WARN: &str = "WARN";
pub const GROUP_PREFIX_INFO: &str = "INFO";

// Reason tag suffixes
pub const TAG_WAIVER: &str = "[WAIVER]";
pub const TAG_WAIVED_AS_INFO: &str = "[WAIVED_AS_INFO]";
pub const TAG_WAIVED_INFO: &str = "[WAIVED_INFO]";

// Status labels
pub const STATUS_LABEL_PASS: &str = "PASS";
pub const STATUS_LABEL_PASS_WAIVED: &str = "PASS(Waive)";
pub const STATUS_LABEL_FAIL: &str = "FAIL";

// Tool
pub const TOOL_NAME: &str = "chkgate";
