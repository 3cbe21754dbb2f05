//! Fuzz target for check configuration loading.
//!
//! Goal: parsing and resolving a check configuration should **never panic**.
//! Invalid input must come back as a `ConfigurationError`.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_check_config
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = chkgate_settings::load_config(text);
    }
});
