//! Turn buckets into labeled groups and their detail items.
//!
//! Every item is pushed once into a [`ResultBuilder`] group; the builder derives both the
//! group entry and the detail record from that single push.

use crate::classify::Classification;
use crate::config::{WaiverConfig, WaiverMode};
use crate::descriptions::Descriptions;
use crate::fingerprint::fingerprint_for_item;
use crate::model::Finding;
use crate::status::Verdict;
use crate::waiver::WaiverOutcome;
use chkgate_types::ids::{TAG_WAIVED_AS_INFO, TAG_WAIVED_INFO, TAG_WAIVER};
use chkgate_types::{CheckResult, GroupId, ItemDraft, ResultBuilder, Severity};

pub fn assemble(
    check_id: &str,
    classification: &Classification,
    waivers: &WaiverConfig,
    outcome: Option<&WaiverOutcome>,
    verdict: Verdict,
    d: &Descriptions,
) -> CheckResult {
    let mut out = Sink::new(check_id);

    match waivers.mode() {
        WaiverMode::Disabled => {
            let err = out.open(Severity::Error, &d.missing_desc);
            for f in classification.violations() {
                out.finding(err, f, d.missing_reason.clone());
            }
            let warn = out.open(Severity::Warn, &d.extra_desc);
            for f in classification.extra() {
                out.finding(warn, f, d.extra_reason.clone());
            }
            let info = out.open(Severity::Info, &d.found_desc);
            for f in classification.satisfied() {
                out.finding(info, f, d.found_reason.clone());
            }
        }
        WaiverMode::ForcedPass => {
            let comments = out.open(Severity::Info, &d.waive_comment_desc);
            for comment in waivers.comments() {
                out.named(
                    comments,
                    &comment,
                    format!("{}{TAG_WAIVED_INFO}", d.waive_comment_reason),
                    None,
                );
            }
            let as_info = out.open(Severity::Info, &d.waived_as_info_desc);
            for f in classification.violations() {
                out.finding(
                    as_info,
                    f,
                    format!("{}{TAG_WAIVED_AS_INFO}", d.missing_reason),
                );
            }
            let info = out.open(Severity::Info, &d.found_desc);
            for f in classification.satisfied() {
                out.finding(info, f, d.found_reason.clone());
            }
            let extra = out.open(Severity::Info, &d.extra_desc);
            for f in classification.extra() {
                out.finding(extra, f, d.extra_reason.clone());
            }
        }
        WaiverMode::Selective => {
            let fallback;
            let outcome = match outcome {
                Some(o) => o,
                None => {
                    fallback = WaiverOutcome {
                        unwaived: classification.violations().to_vec(),
                        ..WaiverOutcome::default()
                    };
                    &fallback
                }
            };

            let err = out.open(Severity::Error, &d.missing_desc);
            for f in &outcome.unwaived {
                out.finding(err, f, d.missing_reason.clone());
            }
            let warn = out.open(Severity::Warn, &d.extra_desc);
            for f in classification.extra() {
                out.finding(warn, f, d.extra_reason.clone());
            }
            let unused = out.open(Severity::Warn, &d.unused_desc);
            for w in &outcome.unused {
                let detail = (!w.reason.is_empty()).then(|| w.reason.clone());
                out.named(
                    unused,
                    &w.name,
                    format!("{}{TAG_WAIVER}", d.unused_reason),
                    detail,
                );
            }
            let waived = out.open(Severity::Info, &d.waived_desc);
            for w in &outcome.waived {
                let reason = if w.reason.is_empty() {
                    format!("{}{TAG_WAIVER}", d.waived_reason)
                } else {
                    format!("{}: {}{TAG_WAIVER}", d.waived_reason, w.reason)
                };
                out.finding(waived, &w.finding, reason);
            }
            let info = out.open(Severity::Info, &d.found_desc);
            for f in classification.satisfied() {
                out.finding(info, f, d.found_reason.clone());
            }
        }
    }

    out.builder.finish(verdict.status, verdict.waived)
}

struct Sink<'a> {
    check_id: &'a str,
    builder: ResultBuilder,
}

impl<'a> Sink<'a> {
    fn new(check_id: &'a str) -> Self {
        Self {
            check_id,
            builder: ResultBuilder::new(),
        }
    }

    fn open(&mut self, severity: Severity, description: &str) -> GroupId {
        self.builder.group(severity, description)
    }

    fn finding(&mut self, group: GroupId, f: &Finding, reason: String) {
        let detail = (!f.detail_text.is_empty()).then(|| f.detail_text.clone());
        let mut draft = self.draft(group, &f.identifier, reason, detail);
        draft.line_number = f.line_number;
        draft.source_path = f.source_path.clone();
        self.builder.push(group, draft);
    }

    fn named(&mut self, group: GroupId, name: &str, reason: String, detail: Option<String>) {
        let draft = self.draft(group, name, reason, detail);
        self.builder.push(group, draft);
    }

    fn draft(
        &self,
        group: GroupId,
        name: &str,
        reason: String,
        detail: Option<String>,
    ) -> ItemDraft {
        let severity = self.builder.severity_of(group).unwrap_or(Severity::Info);
        ItemDraft {
            fingerprint: fingerprint_for_item(self.check_id, severity, name, &reason),
            detail,
            ..ItemDraft::new(name, reason)
        }
    }
}
