use crate::classify::Classification;
use crate::config::WaiverMode;
use crate::waiver::WaiverOutcome;
use chkgate_types::Status;

/// Final status plus the flag that turns a PASS into "PASS(Waive)".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub waived: bool,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            status: Status::Pass,
            waived: false,
        }
    }
}

pub fn resolve_status(
    classification: &Classification,
    waivers: Option<&WaiverOutcome>,
    mode: WaiverMode,
) -> Verdict {
    match mode {
        WaiverMode::ForcedPass => Verdict {
            status: Status::Pass,
            waived: true,
        },
        WaiverMode::Selective => {
            let (unwaived, waived) = match waivers {
                Some(w) => (w.unwaived.len(), w.waived.len()),
                None => (classification.violations().len(), 0),
            };
            if unwaived > 0 {
                Verdict {
                    status: Status::Fail,
                    waived: false,
                }
            } else {
                Verdict {
                    status: Status::Pass,
                    waived: waived > 0,
                }
            }
        }
        WaiverMode::Disabled => {
            if classification.violations().is_empty() {
                Verdict::pass()
            } else {
                Verdict {
                    status: Status::Fail,
                    waived: false,
                }
            }
        }
    }
}
