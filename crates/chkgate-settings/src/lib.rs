//! Check configuration parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{
    CheckConfigV1, CheckerConfig, CountValue, DescriptionOverrides, RequirementsConfig,
    WaiveItem, WaiversConfig,
};
pub use resolve::{CheckerDecl, ResolvedConfig, ScopingMode};

use chkgate_domain::ConfigurationError;

/// Parse a check configuration (TOML) into its typed, user-facing model.
pub fn parse_config_toml(input: &str) -> Result<CheckConfigV1, ConfigurationError> {
    if input.trim().is_empty() {
        return Err(ConfigurationError::MissingInput(
            "check configuration".to_string(),
        ));
    }
    toml::from_str(input).map_err(|e| ConfigurationError::Unparseable(e.to_string()))
}

/// Resolve the configuration model, the checker declaration and the evaluation Type.
pub fn resolve_config(cfg: CheckConfigV1) -> Result<ResolvedConfig, ConfigurationError> {
    resolve::resolve_config(cfg)
}

/// Parse and resolve in one step.
pub fn load_config(input: &str) -> Result<ResolvedConfig, ConfigurationError> {
    resolve_config(parse_config_toml(input)?)
}
