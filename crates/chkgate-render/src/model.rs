use chkgate_types::ids;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    Error,
    Warn,
    Info,
}

impl RenderableSeverity {
    pub fn title(self) -> &'static str {
        match self {
            RenderableSeverity::Error => "Error",
            RenderableSeverity::Warn => "Warn",
            RenderableSeverity::Info => "Info",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Pass,
    /// PASS reached through waivers.
    PassWaived,
    Fail,
}

impl RenderableStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableStatus::Pass => ids::STATUS_LABEL_PASS,
            RenderableStatus::PassWaived => ids::STATUS_LABEL_PASS_WAIVED,
            RenderableStatus::Fail => ids::STATUS_LABEL_FAIL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableGroup {
    pub label: String,
    pub severity: RenderableSeverity,
    pub description: String,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableItem {
    pub severity: RenderableSeverity,
    pub name: String,
    pub reason: String,
    pub line: Option<u32>,
    pub path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCheck {
    pub check_id: String,
    pub description: String,
    pub status: RenderableStatus,
    /// Already in ERROR, WARN, INFO order.
    pub groups: Vec<RenderableGroup>,
    /// Same order as the group entries they back.
    pub items: Vec<RenderableItem>,
    pub warnings: Vec<String>,
}
