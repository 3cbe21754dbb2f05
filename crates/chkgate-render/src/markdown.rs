use crate::{RenderableCheck, RenderableItem, RenderableSeverity};

pub fn render_markdown(check: &RenderableCheck) -> String {
    let mut out = String::new();

    out.push_str("# chkgate report\n\n");
    out.push_str(&format!(
        "- Check: `{}` {}\n- Status: **{}**\n",
        check.check_id,
        check.description,
        check.status.label()
    ));
    for severity in [
        RenderableSeverity::Error,
        RenderableSeverity::Warn,
        RenderableSeverity::Info,
    ] {
        let n = check.items.iter().filter(|i| i.severity == severity).count();
        out.push_str(&format!("- {}: {}\n", severity.title(), n));
    }
    out.push('\n');

    if !check.warnings.is_empty() {
        out.push_str("## Configuration warnings\n\n");
        for w in &check.warnings {
            out.push_str(&format!("> {}\n", w));
        }
        out.push('\n');
    }

    if check.groups.is_empty() {
        out.push_str("No items.\n");
        return out;
    }

    let mut items = check.items.iter();
    for g in &check.groups {
        out.push_str(&format!("## {}: {}\n\n", g.label, g.description));
        for _ in &g.items {
            if let Some(item) = items.next() {
                out.push_str(&bullet(item));
            }
        }
        out.push('\n');
    }

    out
}

fn bullet(item: &RenderableItem) -> String {
    let location = match (item.path.as_deref(), item.line) {
        (Some(path), Some(line)) => format!(" (`{}`:{})", path, line),
        (Some(path), None) => format!(" (`{}`)", path),
        _ => String::new(),
    };
    format!("- `{}`: {}{}\n", item.name, item.reason, location)
}
