use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path of the artifact (log or report) a finding was extracted from.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - absolute paths are preserved as-is; tool logs often live outside the checklist tree
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SourcePath(String);

impl SourcePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().trim().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for SourcePath {
    fn from(value: &Utf8Path) -> Self {
        SourcePath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for SourcePath {
    fn from(value: Utf8PathBuf) -> Self {
        SourcePath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_leading_dot() {
        assert_eq!(SourcePath::new(".\\logs\\sta.log").as_str(), "logs/sta.log");
        assert_eq!(SourcePath::new("././a/b").as_str(), "a/b");
        assert_eq!(SourcePath::new("").as_str(), ".");
    }

    #[test]
    fn keeps_absolute_paths() {
        let p = SourcePath::new("/proj/run/qrc.log");
        assert_eq!(p.as_str(), "/proj/run/qrc.log");
        assert_eq!(SourcePath::from(Utf8Path::new("run\\qrc.log")).as_str(), "run/qrc.log");
    }
}
