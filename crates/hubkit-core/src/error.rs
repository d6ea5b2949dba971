use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SttError {
    #[error("STT provider initialization failed: {0}")]
    InitializationFailed(String),

    #[error("STT platform not found: {0}")]
    PlatformNotFound(String),

    #[error("failed to read audio stream: {0}")]
    StreamRead(String),
}

/// Failure to turn an `X-Speech-Content` header into [`SpeechMetadata`](crate::SpeechMetadata).
///
/// `Malformed` means the header itself is broken; `Unsupported` means it was
/// well formed but named a value no provider can ever accept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("missing X-Speech-Content header")]
    MissingHeader,

    #[error("malformed X-Speech-Content header: {0}")]
    Malformed(String),

    #[error("missing '{0}' in X-Speech-Content header")]
    MissingField(&'static str),

    #[error("unsupported {key}: {value}")]
    Unsupported { key: &'static str, value: String },
}

impl MetadataError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MetadataError::Unsupported { .. })
    }
}
