//! Fuzz target for glob waiver matching.
//!
//! Goal: compiling waiver names as globs and matching identifiers against them
//! should **never panic**. Bad patterns are reported as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_waiver_glob
//! ```

#![no_main]

use arbitrary::Arbitrary;
use chkgate_domain::waiver::{GlobMatch, WaiverMatch};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct GlobInput {
    /// Waiver names, treated as glob patterns (e.g. "CLK_*", "net[0-9]").
    waivers: Vec<String>,
    /// Violation identifiers to match against them.
    identifiers: Vec<String>,
}

fuzz_target!(|input: GlobInput| {
    if input.waivers.len() > 20 || input.identifiers.len() > 100 {
        return;
    }
    if input.waivers.iter().any(|w| w.len() > 256) {
        return;
    }

    let Ok(matcher) = GlobMatch::new(input.waivers.iter().map(String::as_str)) else {
        return;
    };

    for id in input.identifiers.iter().filter(|s| s.len() <= 256) {
        for waiver in &input.waivers {
            let _ = matcher.matches(id, waiver);
        }
    }
});
