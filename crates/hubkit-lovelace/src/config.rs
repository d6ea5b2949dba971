use crate::error::LovelaceError;
use crate::slug::{sanitize_filename, url_slug, validate_icon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Mode {
    Yaml,
    #[default]
    Storage,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Yaml => "yaml",
            Mode::Storage => "storage",
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "yaml" => Ok(Mode::Yaml),
            "storage" => Ok(Mode::Storage),
            _ => Err(format!("unknown lovelace mode '{value}', expected yaml or storage")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Js,
    Css,
    Module,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    #[serde(rename = "type")]
    pub res_type: ResourceType,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sidebar {
    pub icon: String,
    pub title: String,
}

impl Sidebar {
    pub fn validate(&self) -> Result<(), LovelaceError> {
        validate_icon(&self.icon)?;
        Ok(())
    }
}

/// A dashboard declared in the config file. Always backed by a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YamlDashboardConfig {
    pub mode: Mode,

    pub filename: String,

    #[serde(default)]
    pub require_admin: bool,

    #[serde(default)]
    pub sidebar: Option<Sidebar>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LovelaceConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Keyed by url path.
    #[serde(default)]
    pub dashboards: BTreeMap<String, YamlDashboardConfig>,

    #[serde(default)]
    pub resources: Option<Vec<ResourceConfig>>,
}

impl LovelaceConfig {
    /// Build from the raw `[lovelace]` table; a missing section yields the defaults.
    pub fn from_value(value: Option<toml::Value>) -> Result<Self, LovelaceError> {
        let mut config: LovelaceConfig = match value {
            Some(v) => v.try_into()?,
            None => LovelaceConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LovelaceError> {
        let mut config: LovelaceConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check slugs, modes and icons; sanitise dashboard file names in place.
    fn validate(&mut self) -> Result<(), LovelaceError> {
        for (url_path, dashboard) in self.dashboards.iter_mut() {
            url_slug(url_path)?;
            if dashboard.mode != Mode::Yaml {
                return Err(LovelaceError::Invalid(format!(
                    "dashboard {url_path} must use mode yaml"
                )));
            }
            if let Some(sidebar) = &dashboard.sidebar {
                sidebar.validate()?;
            }
            dashboard.filename = sanitize_filename(&dashboard.filename);
            if dashboard.filename.is_empty() {
                return Err(LovelaceError::Invalid(format!(
                    "dashboard {url_path} has an empty filename"
                )));
            }
        }

        if let Some(resources) = &self.resources {
            if let Some(bad) = resources.iter().find(|r| r.url.trim().is_empty()) {
                return Err(LovelaceError::Invalid(format!(
                    "resource of type {:?} has an empty url",
                    bad.res_type
                )));
            }
        }
        Ok(())
    }
}
