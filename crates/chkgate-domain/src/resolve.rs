use crate::config::{Requirements, WaiverConfig};
use chkgate_types::CheckType;

/// Pick the evaluation Type.
///
/// Pattern search means `pattern_items` is non-empty, whatever `requirements.value` says.
/// Only `waivers.value > 0` counts as waiver support; `0` (forced pass) stays Type 1/2.
pub fn resolve_type(requirements: &Requirements, waivers: &WaiverConfig) -> CheckType {
    let pattern_search = requirements.has_pattern_search();
    let waiver_support = waivers.value.is_some_and(|v| v > 0);

    match (pattern_search, waiver_support) {
        (false, false) => CheckType::Boolean,
        (true, false) => CheckType::PatternSearch,
        (true, true) => CheckType::PatternWaiver,
        (false, true) => CheckType::BooleanWaiver,
    }
}
