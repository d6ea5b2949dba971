pub mod demo_provider;
pub mod host;
pub mod metadata;
pub mod provider_trait;
pub mod registry;
pub mod view;

pub use demo_provider::DemoProvider;
pub use host::{setup_providers, Providers};
pub use metadata::{metadata_from_headers, parse_speech_content, SPEECH_CONTENT_HEADER};
pub use provider_trait::{AudioStream, SttProvider};
pub use registry::PlatformRegistry;
pub use view::{router, ProviderInfo, ViewError};
