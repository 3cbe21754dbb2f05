//! Configuration errors abort a check before classification; they are never a FAIL verdict.

use chkgate_types::CheckType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("waivers.value = 0 (forced pass) requires at least one waive_items comment")]
    ForcedPassWithoutComments,

    #[error("invalid {field}: {value} (expected a non-negative integer or \"N/A\")")]
    InvalidCount { field: String, value: String },

    #[error("unknown {field}: {value} (expected {expected})")]
    UnknownOption {
        field: String,
        value: String,
        expected: String,
    },

    #[error("invalid waiver pattern {pattern}: {message}")]
    InvalidWaiverPattern { pattern: String, message: String },

    #[error("{check_type} expects {expected} evidence")]
    EvidenceMismatch {
        check_type: CheckType,
        expected: String,
    },

    #[error("unparseable configuration: {0}")]
    Unparseable(String),

    #[error("required input missing: {0}")]
    MissingInput(String),
}
