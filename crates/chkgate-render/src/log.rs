use crate::RenderableCheck;

/// Grouped view: one header line, then every group with its description and identifiers.
pub fn render_log(check: &RenderableCheck) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}:{}:{}\n",
        check.status.label(),
        check.check_id,
        check.description
    ));

    for g in &check.groups {
        out.push_str(&format!("{}-{}:\n", check.check_id, g.label));
        out.push_str(&format!("  {}:\n", g.description));
        for item in &g.items {
            out.push_str(&format!("    {}\n", item));
        }
    }

    out
}
