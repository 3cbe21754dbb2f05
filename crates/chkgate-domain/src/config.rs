//! Normalized check configuration. Loaded once per check and read-only afterwards.

use crate::error::ConfigurationError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Declared pattern count; `None` means "N/A".
    pub value: Option<u32>,
    pub pattern_items: Vec<String>,
}

impl Requirements {
    pub fn has_pattern_search(&self) -> bool {
        !self.pattern_items.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedWaiver {
    pub name: String,
    pub reason: String,
}

impl NamedWaiver {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A `waive_items` entry, tagged once when the configuration is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaiveEntry {
    /// Free-text note; forced-pass mode only, never matched.
    PlainComment(String),
    /// Matchable waiver; selective mode only.
    Named(NamedWaiver),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaiverMode {
    /// `waivers.value` absent.
    Disabled,
    /// `waivers.value == 0`: every violation is reported as information.
    ForcedPass,
    /// `waivers.value > 0`: violations are matched against named waivers.
    Selective,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaiverConfig {
    pub value: Option<u32>,
    pub waive_items: Vec<WaiveEntry>,
}

impl WaiverConfig {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn forced_pass<I, S>(comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: Some(0),
            waive_items: comments
                .into_iter()
                .map(|c| WaiveEntry::PlainComment(c.into()))
                .collect(),
        }
    }

    /// Selective waivers declared with their own count. An empty list still declares
    /// `value = 1`, since `0` would select forced pass.
    pub fn selective(entries: Vec<NamedWaiver>) -> Self {
        Self {
            value: Some(entries.len().max(1) as u32),
            waive_items: entries.into_iter().map(WaiveEntry::Named).collect(),
        }
    }

    pub fn mode(&self) -> WaiverMode {
        match self.value {
            None => WaiverMode::Disabled,
            Some(0) => WaiverMode::ForcedPass,
            Some(_) => WaiverMode::Selective,
        }
    }

    /// Comment lines emitted in forced-pass mode.
    pub fn comments(&self) -> Vec<String> {
        self.waive_items
            .iter()
            .map(|entry| match entry {
                WaiveEntry::PlainComment(text) => text.clone(),
                WaiveEntry::Named(w) if w.reason.is_empty() => w.name.clone(),
                WaiveEntry::Named(w) => format!("{}: {}", w.name, w.reason),
            })
            .collect()
    }

    /// Matchable entries used in selective mode.
    pub fn named(&self) -> Vec<NamedWaiver> {
        self.waive_items
            .iter()
            .map(|entry| match entry {
                WaiveEntry::Named(w) => w.clone(),
                WaiveEntry::PlainComment(text) => NamedWaiver::new(text.clone(), ""),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigModel {
    pub description: String,
    pub requirements: Requirements,
    pub waivers: WaiverConfig,
}

impl ConfigModel {
    /// Hard validation fails the check; soft mismatches come back as warnings.
    pub fn validate(&self) -> Result<Vec<String>, ConfigurationError> {
        let mut warnings = Vec::new();

        if self.waivers.mode() == WaiverMode::ForcedPass && self.waivers.waive_items.is_empty() {
            return Err(ConfigurationError::ForcedPassWithoutComments);
        }

        let patterns = self.requirements.pattern_items.len();
        if patterns > 0 {
            match self.requirements.value {
                Some(v) if v as usize != patterns => warnings.push(format!(
                    "requirements.value = {v} but {patterns} pattern_items are declared"
                )),
                None => warnings.push(format!(
                    "requirements.value is N/A but {patterns} pattern_items are declared"
                )),
                Some(_) => {}
            }
        } else if let Some(v) = self.requirements.value.filter(|v| *v > 0) {
            warnings.push(format!(
                "requirements.value = {v} but no pattern_items are declared"
            ));
        }

        match self.waivers.mode() {
            WaiverMode::Selective => {
                let declared = self.waivers.value.unwrap_or_default() as usize;
                let actual = self.waivers.waive_items.len();
                if declared != actual {
                    warnings.push(format!(
                        "waivers.value = {declared} but {actual} waive_items are declared"
                    ));
                }
            }
            WaiverMode::Disabled if !self.waivers.waive_items.is_empty() => {
                warnings.push(format!(
                    "{} waive_items ignored because waivers.value is N/A",
                    self.waivers.waive_items.len()
                ));
            }
            _ => {}
        }

        Ok(warnings)
    }
}
