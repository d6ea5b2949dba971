use crate::error::PanelError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A frontend route registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub component_name: String,
    pub frontend_url_path: String,
    pub sidebar_title: Option<String>,
    pub sidebar_icon: Option<String>,
    pub require_admin: bool,
    pub config: serde_json::Value,
}

/// Arguments for [`PanelRegistry::register_built_in_panel`].
#[derive(Debug, Clone, Default)]
pub struct PanelRegistration {
    /// Defaults to the component name.
    pub frontend_url_path: Option<String>,
    pub sidebar_title: Option<String>,
    pub sidebar_icon: Option<String>,
    pub require_admin: bool,
    pub config: serde_json::Value,
    /// Replace an existing panel instead of failing.
    pub update: bool,
}

/// Shared registry of frontend panels, keyed by url path.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: Arc<RwLock<BTreeMap<String, Panel>>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_built_in_panel(
        &self,
        component_name: &str,
        registration: PanelRegistration,
    ) -> Result<(), PanelError> {
        let url_path = registration
            .frontend_url_path
            .unwrap_or_else(|| component_name.to_string());

        let mut panels = self.panels.write().unwrap_or_else(PoisonError::into_inner);
        if !registration.update && panels.contains_key(&url_path) {
            return Err(PanelError::Duplicate(url_path));
        }

        tracing::debug!(url_path = %url_path, component = %component_name, "registering panel");
        panels.insert(
            url_path.clone(),
            Panel {
                component_name: component_name.to_string(),
                frontend_url_path: url_path,
                sidebar_title: registration.sidebar_title,
                sidebar_icon: registration.sidebar_icon,
                require_admin: registration.require_admin,
                config: registration.config,
            },
        );
        Ok(())
    }

    pub fn remove_panel(&self, url_path: &str) -> Option<Panel> {
        self.panels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url_path)
    }

    pub fn get(&self, url_path: &str) -> Option<Panel> {
        self.panels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url_path)
            .cloned()
    }

    pub fn contains(&self, url_path: &str) -> bool {
        self.panels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url_path)
    }

    pub fn url_paths(&self) -> Vec<String> {
        self.panels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
