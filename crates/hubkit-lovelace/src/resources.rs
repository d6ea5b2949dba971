use crate::config::{ResourceConfig, ResourceType};
use crate::error::LovelaceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceItem {
    pub id: String,
    #[serde(rename = "type")]
    pub res_type: ResourceType,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCreate {
    pub res_type: ResourceType,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceUpdate {
    #[serde(default)]
    pub res_type: Option<ResourceType>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Frontend resources: fixed by config in yaml mode, editable in storage mode.
#[derive(Debug, Clone)]
pub enum ResourceCollection {
    Yaml(Vec<ResourceItem>),
    Storage { items: Vec<ResourceItem>, next_id: u64 },
}

impl ResourceCollection {
    pub fn yaml(resources: Vec<ResourceConfig>) -> Self {
        let items = resources
            .into_iter()
            .enumerate()
            .map(|(i, r)| ResourceItem {
                id: (i + 1).to_string(),
                res_type: r.res_type,
                url: r.url,
            })
            .collect();
        ResourceCollection::Yaml(items)
    }

    pub fn storage() -> Self {
        ResourceCollection::Storage {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn items(&self) -> &[ResourceItem] {
        match self {
            ResourceCollection::Yaml(items) => items,
            ResourceCollection::Storage { items, .. } => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn create(&mut self, data: ResourceCreate) -> Result<ResourceItem, LovelaceError> {
        let ResourceCollection::Storage { items, next_id } = self else {
            return Err(LovelaceError::ReadOnlyResources);
        };
        validate_url(&data.url)?;

        let item = ResourceItem {
            id: next_id.to_string(),
            res_type: data.res_type,
            url: data.url,
        };
        *next_id += 1;
        items.push(item.clone());
        Ok(item)
    }

    pub fn update(&mut self, id: &str, data: ResourceUpdate) -> Result<ResourceItem, LovelaceError> {
        let ResourceCollection::Storage { items, .. } = self else {
            return Err(LovelaceError::ReadOnlyResources);
        };
        let item = items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LovelaceError::ResourceNotFound(id.to_string()))?;

        if let Some(url) = data.url {
            validate_url(&url)?;
            item.url = url;
        }
        if let Some(res_type) = data.res_type {
            item.res_type = res_type;
        }
        Ok(item.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<ResourceItem, LovelaceError> {
        let ResourceCollection::Storage { items, .. } = self else {
            return Err(LovelaceError::ReadOnlyResources);
        };
        let pos = items
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LovelaceError::ResourceNotFound(id.to_string()))?;
        Ok(items.remove(pos))
    }
}

fn validate_url(url: &str) -> Result<(), LovelaceError> {
    if url.trim().is_empty() {
        return Err(LovelaceError::Invalid("resource url must not be empty".to_string()));
    }
    Ok(())
}
