use crate::model::{CheckConfigV1, CountValue, DescriptionOverrides, WaiveItem};
use chkgate_domain::ConfigurationError;
use chkgate_domain::config::{
    ConfigModel, NamedWaiver, Requirements, WaiveEntry, WaiverConfig, WaiverMode,
};
use chkgate_domain::descriptions::Descriptions;
use chkgate_domain::resolve::resolve_type;
use chkgate_domain::waiver::MatchKind;
use chkgate_types::CheckType;
use chkgate_types::ids::SCHEMA_CHECK_CONFIG_V1;
use std::collections::HashSet;
use tracing::warn;

/// How a pattern checker judges the pattern items it finds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScopingMode {
    #[default]
    Existence,
    /// Found items are judged by the finding's `correct` flag.
    Status,
}

/// The per-checker declaration that travels alongside the configuration model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerDecl {
    pub id: String,
    pub description: String,
    pub mode: ScopingMode,
    pub match_kind: MatchKind,
    pub descriptions: Descriptions,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub checker: CheckerDecl,
    pub model: ConfigModel,
    pub check_type: CheckType,
    /// Soft mismatches; the check still runs.
    pub warnings: Vec<String>,
}

pub fn resolve_config(cfg: CheckConfigV1) -> Result<ResolvedConfig, ConfigurationError> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CHECK_CONFIG_V1
    {
        return Err(ConfigurationError::UnknownOption {
            field: "schema".to_string(),
            value: schema.to_string(),
            expected: SCHEMA_CHECK_CONFIG_V1.to_string(),
        });
    }

    let id = cfg
        .checker
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ConfigurationError::MissingInput("checker.id".to_string()))?
        .to_string();

    let mut warnings = Vec::new();

    // Requirements
    let pattern_items = dedup_patterns(&cfg.requirements.pattern_items, &mut warnings);
    let requirements = Requirements {
        value: parse_count("requirements.value", cfg.requirements.value.as_ref())?,
        pattern_items,
    };

    // Waivers
    let waiver_value = parse_count("waivers.value", cfg.waivers.value.as_ref())?;
    let waivers = WaiverConfig {
        value: waiver_value,
        waive_items: tag_waive_items(&cfg.waivers.waive_items, waiver_value),
    };

    let model = ConfigModel {
        description: cfg.checker.description.clone().unwrap_or_default(),
        requirements,
        waivers,
    };
    // Logged by the engine when the model is evaluated.
    let validation = model.validate()?;

    let check_type = resolve_type(&model.requirements, &model.waivers);

    // Checker declaration
    let mode = match cfg.checker.mode.as_deref() {
        None | Some("existence") => ScopingMode::Existence,
        Some("status") => ScopingMode::Status,
        Some(other) => {
            return Err(ConfigurationError::UnknownOption {
                field: "checker.mode".to_string(),
                value: other.to_string(),
                expected: "existence|status".to_string(),
            });
        }
    };
    let separator = parse_separator(cfg.checker.view_separator.as_deref())?;
    let match_kind = match cfg.checker.waiver_match.as_deref() {
        None => MatchKind::Exact,
        Some(name) => MatchKind::parse(name, separator).ok_or_else(|| {
            ConfigurationError::UnknownOption {
                field: "checker.waiver_match".to_string(),
                value: name.to_string(),
                expected: MatchKind::NAMES.to_string(),
            }
        })?,
    };

    if cfg.checker.mode.is_some() && !check_type.uses_patterns() {
        warnings.push(format!(
            "checker.mode is ignored by {check_type} (no pattern_items)"
        ));
    }
    if cfg.checker.waiver_match.is_some() && !check_type.uses_selective_waivers() {
        warnings.push(format!(
            "checker.waiver_match is ignored by {check_type} (waivers.value is not > 0)"
        ));
    }

    // Reject bad glob patterns before any evidence is read.
    if model.waivers.mode() == WaiverMode::Selective {
        match_kind.build(&model.waivers.named())?;
    }

    let mut descriptions = Descriptions::defaults_for(check_type);
    apply_overrides(&mut descriptions, &cfg.checker.descriptions);

    for w in &warnings {
        warn!(check_id = %id, "{w}");
    }
    warnings.extend(validation);

    Ok(ResolvedConfig {
        checker: CheckerDecl {
            id,
            description: model.description.clone(),
            mode,
            match_kind,
            descriptions,
        },
        model,
        check_type,
        warnings,
    })
}

/// `None`, `"N/A"`, `"n/a"`, `"NA"` and `""` all mean "absent".
fn parse_count(
    field: &str,
    value: Option<&CountValue>,
) -> Result<Option<u32>, ConfigurationError> {
    let invalid = |v: String| ConfigurationError::InvalidCount {
        field: field.to_string(),
        value: v,
    };
    match value {
        None => Ok(None),
        Some(CountValue::Number(n)) => u32::try_from(*n)
            .map(Some)
            .map_err(|_| invalid(n.to_string())),
        Some(CountValue::Text(s)) => {
            let t = s.trim();
            if t.is_empty() || t.eq_ignore_ascii_case("n/a") || t.eq_ignore_ascii_case("na") {
                Ok(None)
            } else {
                t.parse::<u32>().map(Some).map_err(|_| invalid(s.clone()))
            }
        }
    }
}

fn parse_separator(value: Option<&str>) -> Result<char, ConfigurationError> {
    let Some(s) = value else {
        return Ok('/');
    };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigurationError::UnknownOption {
            field: "checker.view_separator".to_string(),
            value: s.to_string(),
            expected: "a single character".to_string(),
        }),
    }
}

fn dedup_patterns(items: &[String], warnings: &mut Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.as_str()) {
            out.push(item.clone());
        } else {
            warnings.push(format!("duplicate pattern_items entry ignored: {item}"));
        }
    }
    out
}

/// Tag each entry once, according to the waiver mode its count selects.
fn tag_waive_items(items: &[WaiveItem], value: Option<u32>) -> Vec<WaiveEntry> {
    items
        .iter()
        .map(|item| match (value, item) {
            (Some(0), WaiveItem::Text(text)) => WaiveEntry::PlainComment(text.clone()),
            (Some(0), WaiveItem::Entry { name, reason }) if reason.is_empty() => {
                WaiveEntry::PlainComment(name.clone())
            }
            (Some(0), WaiveItem::Entry { name, reason }) => {
                WaiveEntry::PlainComment(format!("{name}: {reason}"))
            }
            (_, WaiveItem::Text(text)) => WaiveEntry::Named(NamedWaiver::new(text.clone(), "")),
            (_, WaiveItem::Entry { name, reason }) => {
                WaiveEntry::Named(NamedWaiver::new(name.clone(), reason.clone()))
            }
        })
        .collect()
}

fn apply_overrides(d: &mut Descriptions, o: &DescriptionOverrides) {
    let pairs: [(&mut String, &Option<String>); 13] = [
        (&mut d.found_desc, &o.found_desc),
        (&mut d.found_reason, &o.found_reason),
        (&mut d.missing_desc, &o.missing_desc),
        (&mut d.missing_reason, &o.missing_reason),
        (&mut d.extra_desc, &o.extra_desc),
        (&mut d.extra_reason, &o.extra_reason),
        (&mut d.waived_desc, &o.waived_desc),
        (&mut d.waived_reason, &o.waived_reason),
        (&mut d.unused_desc, &o.unused_desc),
        (&mut d.unused_reason, &o.unused_reason),
        (&mut d.waived_as_info_desc, &o.waived_as_info_desc),
        (&mut d.waive_comment_desc, &o.waive_comment_desc),
        (&mut d.waive_comment_reason, &o.waive_comment_reason),
    ];
    for (slot, value) in pairs {
        if let Some(v) = value {
            *slot = v.clone();
        }
    }
}
