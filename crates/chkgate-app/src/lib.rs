//! Use case orchestration for chkgate.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod evidence;
mod render;
mod report;

pub use check::{CheckInput, CheckOutput, run_check, status_exit_code};
pub use evidence::{ParsedEvidence, parse_evidence_json};
pub use render::{View, render_view};
pub use report::{parse_report_json, serialize_report, to_renderable};
