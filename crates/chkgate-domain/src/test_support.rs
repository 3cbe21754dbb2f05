use crate::config::{ConfigModel, Requirements, WaiverConfig};
use crate::model::{Evidence, Finding};

pub fn findings(ids: &[&str]) -> Vec<Finding> {
    ids.iter().map(|id| Finding::new(*id)).collect()
}

pub fn patterns(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn ids_of(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.identifier.as_str()).collect()
}

pub fn split(violations: &[&str], passes: &[&str]) -> Evidence {
    Evidence::Split {
        violations: findings(violations),
        passes: findings(passes),
    }
}

pub fn boolean_config(waivers: WaiverConfig) -> ConfigModel {
    ConfigModel {
        description: "boolean check".to_string(),
        requirements: Requirements::default(),
        waivers,
    }
}

pub fn pattern_config(items: &[&str], waivers: WaiverConfig) -> ConfigModel {
    ConfigModel {
        description: "pattern check".to_string(),
        requirements: Requirements {
            value: Some(items.len() as u32),
            pattern_items: patterns(items),
        },
        waivers,
    }
}
