pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, GeneralConfig, HttpConfig, SttPlatformConfig};
pub use error::{ConfigError, MetadataError, SttError};
pub use types::{AudioCodec, AudioFormat, SpeechMetadata, AUDIO_BITRATES, AUDIO_SAMPLERATES};
