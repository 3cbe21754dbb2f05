use chkgate_types::SourcePath;

/// One fact surfaced by an external parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Finding {
    /// Name used for pattern and waiver matching.
    pub identifier: String,
    pub line_number: Option<u32>,
    pub source_path: Option<SourcePath>,
    pub detail_text: String,
}

impl Finding {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, source_path: impl AsRef<str>, line_number: u32) -> Self {
        self.source_path = Some(SourcePath::new(source_path));
        self.line_number = Some(line_number);
        self
    }

    pub fn with_detail(mut self, detail_text: impl Into<String>) -> Self {
        self.detail_text = detail_text.into();
        self
    }
}

/// What a parser hands to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evidence {
    /// Everything the parser saw; scoped against `pattern_items` (Types 2/3).
    Scoped(Vec<Finding>),
    /// Domain-specific pass/fail split decided by the parser (Types 1/4).
    Split {
        violations: Vec<Finding>,
        passes: Vec<Finding>,
    },
}

impl Evidence {
    pub fn shape(&self) -> &'static str {
        match self {
            Evidence::Scoped(_) => "scoped",
            Evidence::Split { .. } => "split",
        }
    }
}
