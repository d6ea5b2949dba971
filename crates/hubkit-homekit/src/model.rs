//! Accessory database as reported by a paired HomeKit device.

use crate::error::HomeKitError;
use serde::{Deserialize, Serialize};

const HAP_CHARACTERISTIC_PREFIX: &str = "public.hap.characteristic.";
const HAP_SERVICE_PREFIX: &str = "public.hap.service.";

#[derive(Debug, Clone, Deserialize)]
struct AccessoryDatabase {
    accessories: Vec<Accessory>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Accessory {
    pub aid: u64,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub iid: u64,
    #[serde(rename = "type")]
    pub stype: String,
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Characteristic {
    pub iid: u64,
    #[serde(rename = "type")]
    pub ctype: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub perms: Vec<String>,
    #[serde(default, rename = "valid-values")]
    pub valid_values: Option<Vec<u8>>,
    #[serde(default, rename = "minValue")]
    pub min_value: Option<u8>,
    #[serde(default, rename = "maxValue")]
    pub max_value: Option<u8>,
}

/// One value written to an accessory in a `put_characteristics` batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicWrite {
    pub aid: u64,
    pub iid: u64,
    pub value: serde_json::Value,
}

impl Accessory {
    /// Parse the `{"accessories": [...]}` document returned by `/accessories`.
    pub fn list_from_json(json: &str) -> Result<Vec<Accessory>, HomeKitError> {
        let db: AccessoryDatabase = serde_json::from_str(json)?;
        Ok(db.accessories)
    }

    pub fn service(&self, iid: u64) -> Option<&Service> {
        self.services.iter().find(|s| s.iid == iid)
    }
}

impl Service {
    /// Short service name, e.g. `television`.
    pub fn short_type(&self) -> &str {
        self.stype
            .strip_prefix(HAP_SERVICE_PREFIX)
            .unwrap_or(&self.stype)
    }

    pub fn characteristic(&self, short_type: &str) -> Option<&Characteristic> {
        self.characteristics
            .iter()
            .find(|c| c.short_type() == short_type)
    }
}

impl Characteristic {
    /// Short characteristic name, e.g. `current-media-state`.
    pub fn short_type(&self) -> &str {
        self.ctype
            .strip_prefix(HAP_CHARACTERISTIC_PREFIX)
            .unwrap_or(&self.ctype)
    }

    pub fn value_u8(&self) -> Option<u8> {
        self.value
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
    }
}
