use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// User configuration loaded from `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub author: String,
    pub start_day: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub ignore_organizations: Vec<String>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to load settings file {}", path.display()))
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_yaml::from_str(raw).context("invalid settings YAML")?;
        if settings.author.trim().is_empty() {
            anyhow::bail!("`author` must not be empty");
        }
        Ok(settings)
    }
}
