//! Fuzz target for the whole check pipeline.
//!
//! Goal: any configuration/evidence pair either yields a report or an error.
//! A produced report must keep its groups and detail items in step.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_run_check
//! ```

#![no_main]

use arbitrary::Arbitrary;
use chkgate_app::{CheckInput, run_check};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct CheckPair {
    config: String,
    evidence: String,
}

fuzz_target!(|input: CheckPair| {
    if input.config.len() > 4096 || input.evidence.len() > 16384 {
        return;
    }

    let Ok(output) = run_check(CheckInput {
        config_text: &input.config,
        evidence_text: &input.evidence,
    }) else {
        return;
    };

    let result = &output.report.result;
    let entries: usize = result.groups().iter().map(|g| g.items.len()).sum();
    assert_eq!(entries, result.details().len());
});
