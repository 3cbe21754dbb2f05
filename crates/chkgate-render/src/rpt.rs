use crate::{RenderableCheck, RenderableItem, RenderableSeverity};

/// Per-item view: header, then an occurrence count and numbered lines for each severity present.
pub fn render_rpt(check: &RenderableCheck) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", check.check_id, check.status.label()));

    for severity in [
        RenderableSeverity::Error,
        RenderableSeverity::Warn,
        RenderableSeverity::Info,
    ] {
        let items: Vec<&RenderableItem> = check
            .items
            .iter()
            .filter(|i| i.severity == severity)
            .collect();
        if items.is_empty() {
            continue;
        }

        out.push_str(&format!("{} Occurrence: {}\n", severity.title(), items.len()));
        for (k, item) in items.iter().enumerate() {
            out.push_str(&format!(
                "{}: {}: {}{}: {}\n",
                k + 1,
                severity.title(),
                item.name,
                location_suffix(item),
                item.reason
            ));
        }
    }

    out
}

fn location_suffix(item: &RenderableItem) -> String {
    match (item.line, item.path.as_deref()) {
        (Some(line), Some(path)) => format!(". In line {line}, {path}"),
        (None, Some(path)) => format!(". In {path}"),
        (Some(line), None) => format!(". In line {line}"),
        (None, None) => String::new(),
    }
}
