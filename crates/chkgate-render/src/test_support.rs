use crate::{RenderableCheck, RenderableGroup, RenderableItem, RenderableSeverity, RenderableStatus};

pub fn group(
    label: &str,
    severity: RenderableSeverity,
    description: &str,
    items: &[&str],
) -> RenderableGroup {
    RenderableGroup {
        label: label.to_string(),
        severity,
        description: description.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// Items are derived from the groups; each reason is its group's description.
pub fn check(status: RenderableStatus, groups: Vec<RenderableGroup>) -> RenderableCheck {
    let items = groups
        .iter()
        .flat_map(|g| {
            g.items.iter().map(|name| RenderableItem {
                severity: g.severity,
                name: name.clone(),
                reason: g.description.clone(),
                line: None,
                path: None,
            })
        })
        .collect();

    RenderableCheck {
        check_id: "IMP-10-0-0-00".to_string(),
        description: "Confirm the netlist version is correct".to_string(),
        status,
        groups,
        items,
        warnings: Vec::new(),
    }
}
