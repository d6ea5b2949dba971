use crate::config::{LovelaceConfig, Mode, ResourceConfig, Sidebar};
use crate::dashboard::{
    ChangeType, Dashboard, DashboardCreate, DashboardInfo, DashboardItem, DashboardUpdate,
    DashboardsCollection,
};
use crate::error::{LovelaceError, PanelError};
use crate::panels::{PanelRegistration, PanelRegistry};
use crate::resources::ResourceCollection;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DOMAIN: &str = "lovelace";

pub type SharedLovelace = Arc<RwLock<Lovelace>>;

/// Host settings that are not part of the `[lovelace]` section.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub safe_mode: bool,
    /// Directory yaml dashboard filenames are resolved against.
    pub config_dir: PathBuf,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            safe_mode: false,
            config_dir: PathBuf::from("."),
        }
    }
}

/// Runtime state of the dashboard subsystem.
pub struct Lovelace {
    mode: Mode,
    safe_mode: bool,
    panels: PanelRegistry,
    default_dashboard: Dashboard,
    dashboards: BTreeMap<String, Dashboard>,
    resources: ResourceCollection,
    storage_dashboards: DashboardsCollection,
}

impl Lovelace {
    /// Register the built-in panel, pick the resource collection and, unless
    /// in safe mode, register every YAML dashboard.
    pub fn setup(
        config: LovelaceConfig,
        panels: PanelRegistry,
        options: SetupOptions,
    ) -> Result<Self, LovelaceError> {
        let mode = config.mode;
        panels.register_built_in_panel(
            DOMAIN,
            PanelRegistration {
                config: json!({ "mode": mode }),
                ..Default::default()
            },
        )?;

        let mut default_dashboard = Dashboard::default_dashboard(mode, &options.config_dir);

        let resources = match mode {
            Mode::Yaml => {
                let yaml_resources = match config.resources {
                    Some(resources) => resources,
                    None => resources_from_dashboard(&mut default_dashboard),
                };
                ResourceCollection::yaml(yaml_resources)
            }
            Mode::Storage => {
                if config.resources.is_some() {
                    tracing::warn!(
                        "Lovelace is running in storage mode. Define resources via user interface"
                    );
                }
                ResourceCollection::storage()
            }
        };

        let mut lovelace = Self {
            mode,
            safe_mode: options.safe_mode,
            panels,
            default_dashboard,
            dashboards: BTreeMap::new(),
            resources,
            storage_dashboards: DashboardsCollection::new(),
        };

        if lovelace.safe_mode {
            tracing::info!("safe mode, skipping lovelace dashboards");
            return Ok(lovelace);
        }

        for (url_path, dashboard_conf) in &config.dashboards {
            lovelace.dashboards.insert(
                url_path.clone(),
                Dashboard::yaml(url_path, dashboard_conf, &options.config_dir),
            );

            if let Err(e) = register_panel(
                &lovelace.panels,
                url_path,
                Mode::Yaml,
                dashboard_conf.require_admin,
                dashboard_conf.sidebar.as_ref(),
                false,
            ) {
                tracing::warn!("Panel url path {url_path} is not unique: {e}");
            }
        }

        Ok(lovelace)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn default_dashboard(&self) -> &Dashboard {
        &self.default_dashboard
    }

    pub fn dashboard(&self, url_path: &str) -> Option<&Dashboard> {
        self.dashboards.get(url_path)
    }

    /// All named dashboards, ordered by url path.
    pub fn dashboards(&self) -> Vec<&Dashboard> {
        self.dashboards.values().collect()
    }

    pub fn resources(&self) -> &ResourceCollection {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceCollection {
        &mut self.resources
    }

    pub fn storage_dashboards(&self) -> &DashboardsCollection {
        &self.storage_dashboards
    }

    /// Health summary of the default dashboard.
    pub fn info(&mut self) -> DashboardInfo {
        self.default_dashboard.info()
    }

    /// Config of the dashboard at `url_path`, or of the default one for `None`.
    pub fn load_config(
        &mut self,
        url_path: Option<&str>,
        force: bool,
    ) -> Result<serde_json::Value, LovelaceError> {
        let safe_mode = self.safe_mode;
        let dashboard = self.dashboard_mut(url_path)?;
        if safe_mode && dashboard.mode == Mode::Storage {
            return Err(LovelaceError::ConfigNotFound);
        }
        dashboard.load_config(force)
    }

    pub fn save_config(
        &mut self,
        url_path: Option<&str>,
        config: serde_json::Value,
    ) -> Result<(), LovelaceError> {
        let safe_mode = self.safe_mode;
        let dashboard = self.dashboard_mut(url_path)?;
        if safe_mode && dashboard.mode == Mode::Storage {
            return Err(LovelaceError::SafeMode);
        }
        dashboard.save_config(config)
    }

    pub fn delete_config(&mut self, url_path: Option<&str>) -> Result<(), LovelaceError> {
        let safe_mode = self.safe_mode;
        let dashboard = self.dashboard_mut(url_path)?;
        if safe_mode && dashboard.mode == Mode::Storage {
            return Err(LovelaceError::SafeMode);
        }
        dashboard.delete_config()
    }

    fn dashboard_mut(&mut self, url_path: Option<&str>) -> Result<&mut Dashboard, LovelaceError> {
        match url_path {
            None => Ok(&mut self.default_dashboard),
            Some(path) => self
                .dashboards
                .get_mut(path)
                .ok_or_else(|| LovelaceError::DashboardNotFound(path.to_string())),
        }
    }

    pub fn create_dashboard(&mut self, data: DashboardCreate) -> Result<DashboardItem, LovelaceError> {
        self.ensure_not_safe_mode()?;
        let item = self.storage_dashboards.create(data)?;
        self.dashboard_changed(ChangeType::Added, &item);
        Ok(item)
    }

    pub fn update_dashboard(
        &mut self,
        id: &str,
        data: DashboardUpdate,
    ) -> Result<DashboardItem, LovelaceError> {
        self.ensure_not_safe_mode()?;
        let item = self.storage_dashboards.update(id, data)?;
        self.dashboard_changed(ChangeType::Updated, &item);
        Ok(item)
    }

    pub fn delete_dashboard(&mut self, id: &str) -> Result<DashboardItem, LovelaceError> {
        self.ensure_not_safe_mode()?;
        let item = self.storage_dashboards.delete(id)?;
        self.dashboard_changed(ChangeType::Removed, &item);
        Ok(item)
    }

    fn ensure_not_safe_mode(&self) -> Result<(), LovelaceError> {
        if self.safe_mode {
            return Err(LovelaceError::SafeMode);
        }
        Ok(())
    }

    fn owns_url_path(&self, item: &DashboardItem) -> bool {
        self.dashboards
            .get(&item.url_path)
            .is_some_and(|d| d.item_id.as_deref() == Some(item.id.as_str()))
    }

    /// The panel at `url_path` is absent or registered by this component.
    fn panel_is_ours(&self, url_path: &str) -> bool {
        self.panels
            .get(url_path)
            .map_or(true, |panel| panel.component_name == DOMAIN)
    }

    fn dashboard_changed(&mut self, change: ChangeType, item: &DashboardItem) {
        let url_path = item.url_path.as_str();

        match change {
            ChangeType::Added => {
                if let Some(existing) = self.dashboards.get(url_path) {
                    tracing::warn!(
                        "Cannot register panel at {url_path}, it is already defined in {} mode",
                        existing.mode
                    );
                    return;
                }
                if let Err(e) = register_panel(
                    &self.panels,
                    url_path,
                    Mode::Storage,
                    item.require_admin,
                    item.sidebar.as_ref(),
                    false,
                ) {
                    tracing::warn!("Failed to {change} panel {url_path} from storage: {e}");
                    return;
                }
                self.dashboards
                    .insert(url_path.to_string(), Dashboard::storage(item));
            }
            ChangeType::Updated => {
                if !self.owns_url_path(item) || !self.panel_is_ours(url_path) {
                    tracing::warn!(
                        "Cannot update panel at {url_path}, it is owned by someone else"
                    );
                    return;
                }
                if let Some(dashboard) = self.dashboards.get_mut(url_path) {
                    dashboard.require_admin = item.require_admin;
                    dashboard.sidebar = item.sidebar.clone();
                }
                if let Err(e) = register_panel(
                    &self.panels,
                    url_path,
                    Mode::Storage,
                    item.require_admin,
                    item.sidebar.as_ref(),
                    true,
                ) {
                    tracing::warn!("Failed to {change} panel {url_path} from storage: {e}");
                }
            }
            ChangeType::Removed => {
                if !self.owns_url_path(item) {
                    return;
                }
                if self.panel_is_ours(url_path) {
                    self.panels.remove_panel(url_path);
                } else {
                    tracing::warn!("Not removing panel at {url_path}, it is owned by someone else");
                }
                self.dashboards.remove(url_path);
            }
        }
    }
}

/// In yaml mode without configured resources, fall back to the ones listed in
/// the default dashboard file.
fn resources_from_dashboard(dashboard: &mut Dashboard) -> Vec<ResourceConfig> {
    let config = match dashboard.load_config(false) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!("no resources from default dashboard: {e}");
            return Vec::new();
        }
    };
    let Some(resources) = config.get("resources") else {
        return Vec::new();
    };

    tracing::warn!(
        "Resources need to be specified in the [lovelace] section of the config file"
    );
    match serde_json::from_value(resources.clone()) {
        Ok(resources) => resources,
        Err(e) => {
            tracing::warn!("ignoring invalid resources in dashboard config: {e}");
            Vec::new()
        }
    }
}

fn register_panel(
    panels: &PanelRegistry,
    url_path: &str,
    mode: Mode,
    require_admin: bool,
    sidebar: Option<&Sidebar>,
    update: bool,
) -> Result<(), PanelError> {
    panels.register_built_in_panel(
        DOMAIN,
        PanelRegistration {
            frontend_url_path: Some(url_path.to_string()),
            sidebar_title: sidebar.map(|s| s.title.clone()),
            sidebar_icon: sidebar.map(|s| s.icon.clone()),
            require_admin,
            config: json!({ "mode": mode }),
            update,
        },
    )
}
