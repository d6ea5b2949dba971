use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("overwriting panel {0}")]
    Duplicate(String),
}

#[derive(Debug, Error)]
pub enum LovelaceError {
    #[error("invalid lovelace config: {0}")]
    Invalid(String),

    #[error("failed to parse lovelace config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("dashboard not found: {0}")]
    DashboardNotFound(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("resources are read-only in yaml mode")]
    ReadOnlyResources,

    #[error("no dashboard config found")]
    ConfigNotFound,

    #[error("{0} not found")]
    YamlFileNotFound(String),

    #[error("cannot modify a yaml dashboard config")]
    ReadOnlyConfig,

    #[error("not supported in safe mode")]
    SafeMode,

    #[error("failed to read dashboard config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dashboard yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Panel(#[from] PanelError),
}

impl LovelaceError {
    /// Both "no stored config" and "yaml file missing" count as not found.
    pub fn is_config_not_found(&self) -> bool {
        matches!(
            self,
            LovelaceError::ConfigNotFound | LovelaceError::YamlFileNotFound(_)
        )
    }
}
