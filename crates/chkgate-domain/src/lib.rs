//! Pure check evaluation (no IO).
//!
//! Input: a resolved check configuration plus findings produced elsewhere.
//! Output: classification buckets, a verdict, and an assembled `CheckResult`.

#![forbid(unsafe_code)]

pub mod assemble;
pub mod classify;
pub mod config;
pub mod descriptions;
pub mod error;
pub mod model;
pub mod report;
pub mod resolve;
pub mod status;
pub mod waiver;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{CheckContext, evaluate};
pub use error::ConfigurationError;
pub use fingerprint::fingerprint_for_item;
