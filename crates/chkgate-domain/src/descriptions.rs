use chkgate_types::CheckType;

/// Group descriptions and reason templates for one checker.
///
/// Constructed once per checker and passed to the assembler; never shared mutable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptions {
    pub found_desc: String,
    pub found_reason: String,
    pub missing_desc: String,
    pub missing_reason: String,
    pub extra_desc: String,
    pub extra_reason: String,
    pub waived_desc: String,
    pub waived_reason: String,
    pub unused_desc: String,
    pub unused_reason: String,
    pub waived_as_info_desc: String,
    pub waive_comment_desc: String,
    pub waive_comment_reason: String,
}

impl Descriptions {
    pub fn defaults_for(check_type: CheckType) -> Self {
        let (found_desc, found_reason, missing_desc, missing_reason) = if check_type.uses_patterns()
        {
            (
                "Required items found",
                "Required item found",
                "Required items missing",
                "Required item missing",
            )
        } else {
            (
                "Checks passed",
                "Check passed",
                "Violations found",
                "Violation found",
            )
        };

        Self {
            found_desc: found_desc.to_string(),
            found_reason: found_reason.to_string(),
            missing_desc: missing_desc.to_string(),
            missing_reason: missing_reason.to_string(),
            extra_desc: "Items outside the declared pattern scope".to_string(),
            extra_reason: "Item not in pattern_items".to_string(),
            waived_desc: "Violations waived".to_string(),
            waived_reason: "Waived".to_string(),
            unused_desc: "Unused waiver entries".to_string(),
            unused_reason: "Waiver not matched by any violation".to_string(),
            waived_as_info_desc: "Violations reported as information (forced pass)".to_string(),
            waive_comment_desc: "Waiver comments".to_string(),
            waive_comment_reason: "Waiver comment".to_string(),
        }
    }
}
