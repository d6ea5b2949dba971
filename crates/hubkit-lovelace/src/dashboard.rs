use crate::config::{Mode, Sidebar, YamlDashboardConfig};
use crate::error::LovelaceError;
use crate::slug::url_slug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Config file of the default dashboard in yaml mode.
pub const DEFAULT_YAML_FILENAME: &str = "ui-lovelace.yaml";

#[derive(Debug, Clone, PartialEq)]
enum ConfigStore {
    /// Kept in memory; `None` until first saved.
    Storage(Option<serde_json::Value>),
    /// Read from `path` on first load, cached until a forced reload.
    Yaml {
        path: PathBuf,
        cache: Option<serde_json::Value>,
    },
}

/// A dashboard known to the frontend. `url_path` is `None` for the default one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub url_path: Option<String>,
    pub mode: Mode,
    pub require_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Sidebar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Id of the backing storage item, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip)]
    store: ConfigStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfoMode {
    Storage,
    Yaml,
    /// Storage mode without a saved config; the frontend generates one.
    AutoGen,
}

/// Summary of a dashboard config for the system health page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardInfo {
    pub mode: InfoMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DashboardInfo {
    fn from_config(mode: InfoMode, config: &serde_json::Value) -> Self {
        let count = |key: &str| {
            config
                .get(key)
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len)
        };
        Self {
            mode,
            resources: Some(count("resources")),
            views: Some(count("views")),
            error: None,
        }
    }
}

impl Dashboard {
    pub fn default_dashboard(mode: Mode, config_dir: &Path) -> Self {
        let store = match mode {
            Mode::Yaml => ConfigStore::Yaml {
                path: config_dir.join(DEFAULT_YAML_FILENAME),
                cache: None,
            },
            Mode::Storage => ConfigStore::Storage(None),
        };
        Self {
            url_path: None,
            mode,
            require_admin: false,
            sidebar: None,
            filename: None,
            item_id: None,
            store,
        }
    }

    pub fn yaml(url_path: &str, conf: &YamlDashboardConfig, config_dir: &Path) -> Self {
        Self {
            url_path: Some(url_path.to_string()),
            mode: Mode::Yaml,
            require_admin: conf.require_admin,
            sidebar: conf.sidebar.clone(),
            filename: Some(conf.filename.clone()),
            item_id: None,
            store: ConfigStore::Yaml {
                path: config_dir.join(&conf.filename),
                cache: None,
            },
        }
    }

    pub fn storage(item: &DashboardItem) -> Self {
        Self {
            url_path: Some(item.url_path.clone()),
            mode: Mode::Storage,
            require_admin: item.require_admin,
            sidebar: item.sidebar.clone(),
            filename: None,
            item_id: Some(item.id.clone()),
            store: ConfigStore::Storage(None),
        }
    }

    /// Return the dashboard config. Yaml configs are cached unless `force`.
    pub fn load_config(&mut self, force: bool) -> Result<serde_json::Value, LovelaceError> {
        match &mut self.store {
            ConfigStore::Storage(config) => config.clone().ok_or(LovelaceError::ConfigNotFound),
            ConfigStore::Yaml { path, cache } => {
                if let (Some(config), false) = (cache.as_ref(), force) {
                    return Ok(config.clone());
                }
                let config = read_yaml(path)?;
                tracing::debug!(path = %path.display(), "loaded dashboard yaml");
                *cache = Some(config.clone());
                Ok(config)
            }
        }
    }

    pub fn save_config(&mut self, config: serde_json::Value) -> Result<(), LovelaceError> {
        match &mut self.store {
            ConfigStore::Storage(stored) => {
                *stored = Some(config);
                Ok(())
            }
            ConfigStore::Yaml { .. } => Err(LovelaceError::ReadOnlyConfig),
        }
    }

    pub fn delete_config(&mut self) -> Result<(), LovelaceError> {
        match &mut self.store {
            ConfigStore::Storage(stored) => {
                *stored = None;
                Ok(())
            }
            ConfigStore::Yaml { .. } => Err(LovelaceError::ReadOnlyConfig),
        }
    }

    pub fn info(&mut self) -> DashboardInfo {
        if let ConfigStore::Storage(stored) = &self.store {
            return match stored {
                Some(config) => DashboardInfo::from_config(InfoMode::Storage, config),
                None => DashboardInfo {
                    mode: InfoMode::AutoGen,
                    resources: None,
                    views: None,
                    error: None,
                },
            };
        }
        match self.load_config(false) {
            Ok(config) => DashboardInfo::from_config(InfoMode::Yaml, &config),
            Err(e) => DashboardInfo {
                mode: InfoMode::Yaml,
                resources: None,
                views: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn read_yaml(path: &Path) -> Result<serde_json::Value, LovelaceError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LovelaceError::YamlFileNotFound(path.display().to_string()),
        _ => LovelaceError::Io(e),
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

/// A dashboard managed through the storage collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardItem {
    pub id: String,
    pub url_path: String,
    pub mode: Mode,
    pub require_admin: bool,
    pub sidebar: Option<Sidebar>,
}

#[derive(Debug, Clone)]
pub struct DashboardCreate {
    pub url_path: String,
    pub require_admin: bool,
    pub sidebar: Option<Sidebar>,
}

/// Fields left as `None` are kept. `sidebar: Some(None)` removes the sidebar entry.
#[derive(Debug, Clone, Default)]
pub struct DashboardUpdate {
    pub require_admin: Option<bool>,
    pub sidebar: Option<Option<Sidebar>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Updated,
    Removed,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeType::Added => "added",
            ChangeType::Updated => "updated",
            ChangeType::Removed => "removed",
        })
    }
}

/// In-memory collection of storage dashboards keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct DashboardsCollection {
    items: BTreeMap<String, DashboardItem>,
}

impl DashboardsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &DashboardItem> {
        self.items.values()
    }

    pub fn get(&self, id: &str) -> Option<&DashboardItem> {
        self.items.get(id)
    }

    pub fn create(&mut self, data: DashboardCreate) -> Result<DashboardItem, LovelaceError> {
        url_slug(&data.url_path)?;
        if let Some(sidebar) = &data.sidebar {
            sidebar.validate()?;
        }
        if self.items.values().any(|i| i.url_path == data.url_path) {
            return Err(LovelaceError::Invalid(format!(
                "dashboard url path {} needs to be unique",
                data.url_path
            )));
        }

        let id = self.next_id(&data.url_path);
        let item = DashboardItem {
            id: id.clone(),
            url_path: data.url_path,
            mode: Mode::Storage,
            require_admin: data.require_admin,
            sidebar: data.sidebar,
        };
        self.items.insert(id, item.clone());
        Ok(item)
    }

    pub fn update(&mut self, id: &str, data: DashboardUpdate) -> Result<DashboardItem, LovelaceError> {
        if let Some(Some(sidebar)) = &data.sidebar {
            sidebar.validate()?;
        }
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| LovelaceError::DashboardNotFound(id.to_string()))?;
        if let Some(require_admin) = data.require_admin {
            item.require_admin = require_admin;
        }
        if let Some(sidebar) = data.sidebar {
            item.sidebar = sidebar;
        }
        Ok(item.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<DashboardItem, LovelaceError> {
        self.items
            .remove(id)
            .ok_or_else(|| LovelaceError::DashboardNotFound(id.to_string()))
    }

    /// Ids derive from the url path; a numeric suffix keeps them unique.
    fn next_id(&self, url_path: &str) -> String {
        let base = url_path.replace('-', "_");
        if !self.items.contains_key(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.items.contains_key(candidate))
            .unwrap_or(base)
    }
}
