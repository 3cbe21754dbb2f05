//! Render use cases: textual views from in-memory reports.

use crate::report::to_renderable;
use chkgate_types::CheckReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Grouped log view.
    Log,
    /// Per-item report view.
    Rpt,
    Markdown,
}

pub fn render_view(report: &CheckReport, view: View) -> String {
    let renderable = to_renderable(report);
    match view {
        View::Log => chkgate_render::render_log(&renderable),
        View::Rpt => chkgate_render::render_rpt(&renderable),
        View::Markdown => chkgate_render::render_markdown(&renderable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckInput, run_check};

    #[test]
    fn every_view_starts_with_the_status() {
        let report = run_check(CheckInput {
            config_text: "[checker]\nid = \"CHK\"\ndescription = \"d\"\n",
            evidence_text: r#"{"passes": [{"identifier": "OK"}]}"#,
        })
        .expect("check runs")
        .report;

        assert!(render_view(&report, View::Log).starts_with("PASS:CHK:d\n"));
        assert!(render_view(&report, View::Rpt).starts_with("CHK: PASS\n"));
        assert!(render_view(&report, View::Markdown).contains("Status: **PASS**"));
    }
}
