//! Stable DTOs and IDs used across the chkgate workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted check result and its envelope
//! - stable string IDs, group prefixes and tag suffixes
//! - canonical source path handling

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod result;

pub use path::SourcePath;
pub use result::{
    BucketCounts, CheckMeta, CheckReport, CheckResult, CheckType, DetailItem, GroupId, ItemDraft,
    ResultBuilder, ResultGroup, SCHEMA_RESULT_V1, Severity, Status, ToolMeta,
};
