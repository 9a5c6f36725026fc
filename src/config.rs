use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::{display::DisplayMode, path::PathList};

pub const CONFIG_FILE: &str = "diffyaml.config.yaml";
pub const CONFIG_ENV: &str = "DIFFYAML_CONFIG";

/// Defaults for anything not given on the command line
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Configuration {
    /// Program used to compare the split documents
    pub difftastic: Option<String>,
    pub display: Option<DisplayMode>,
    /// Paths used to name documents for `diff`
    pub paths: Option<PathList>,
    /// Paths used to order documents for `sort`
    pub order: Option<PathList>,
}

impl Configuration {
    pub fn from_file(path: &Utf8Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration '{path}'"))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to deserialize configuration '{path}'"))
    }
}

/// Load the file named by `DIFFYAML_CONFIG`, or `diffyaml.config.yaml` in the
/// working directory if there is one. No file means the built-in defaults.
pub fn config_from_env() -> anyhow::Result<Configuration> {
    let explicit = std::env::var(CONFIG_ENV).ok().map(Utf8PathBuf::from);
    load(explicit.as_deref())
}

fn load(explicit: Option<&Utf8Path>) -> anyhow::Result<Configuration> {
    let path = match explicit {
        Some(path) => path,
        None if Utf8Path::new(CONFIG_FILE).exists() => Utf8Path::new(CONFIG_FILE),
        None => {
            log::debug!("no configuration found, using defaults");
            return Ok(Configuration::default());
        }
    };

    let config = Configuration::from_file(path)?;
    log::info!("loaded configuration from {path}");
    Ok(config)
}
