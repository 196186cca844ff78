//! Resolve the field configuration from `--config` and command-line flags.
//!
//! Sources are layered with figment, later ones winning: built-in defaults,
//! then the config file, then the flags that were actually given.

use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::providers::{Format, Json, Serialized, Yaml};
use figment::Figment;
use numeric_input::NumericConfig;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::cli::ConfigArgs;

/// Flags given on the command line, keyed like the config file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accept_float: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_decimals: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_decimals: Option<usize>,
}

impl From<&ConfigArgs> for FlagOverrides {
    fn from(args: &ConfigArgs) -> Self {
        Self {
            min: args.min,
            max: args.max,
            accept_float: args.accept_float,
            min_decimals: args.min_decimals,
            max_decimals: args.max_decimals,
        }
    }
}

/// Load the config file (if any) and overlay the flags on top of it.
///
/// An inconsistent result (e.g. `min > max`) is logged, not rejected: the
/// engine will simply report such values INVALID.
pub fn resolve_config(args: &ConfigArgs) -> Result<NumericConfig> {
    let mut figment = Figment::from(Serialized::defaults(NumericConfig::default()));

    if let Some(path) = &args.config {
        figment = merge_config_file(figment, path)?;
    }

    let overrides = FlagOverrides::from(args);
    trace!(?overrides, "command-line overrides");
    figment = figment.merge(Serialized::defaults(overrides));

    let config: NumericConfig = figment
        .extract()
        .context("invalid field configuration")?;

    if let Err(e) = config.check() {
        warn!(error = %e, "field configuration is inconsistent");
    }
    debug!(?config, "resolved field configuration");
    Ok(config)
}

/// Merge a YAML or JSON file, chosen by extension.
fn merge_config_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    debug!(path = %path.display(), "loading config file");
    Ok(match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Yaml::file(path)),
    })
}
