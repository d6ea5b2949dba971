use crate::provider_trait::SttProvider;
use crate::registry::PlatformRegistry;
use futures::future::join_all;
use hubkit_core::{SttError, SttPlatformConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only map of provider key to provider, built once at startup.
#[derive(Clone, Default)]
pub struct Providers {
    inner: Arc<HashMap<String, Arc<dyn SttProvider>>>,
}

impl Providers {
    pub fn get(&self, key: &str) -> Option<Arc<dyn SttProvider>> {
        self.inner.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.inner.keys().map(|s| s.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<(String, Arc<dyn SttProvider>)> for Providers {
    fn from_iter<I: IntoIterator<Item = (String, Arc<dyn SttProvider>)>>(iter: I) -> Self {
        Self {
            inner: Arc::new(iter.into_iter().collect()),
        }
    }
}

async fn setup_platform(
    entry: &SttPlatformConfig,
    registry: &PlatformRegistry,
) -> Result<Box<dyn SttProvider>, SttError> {
    let mut provider = registry.create(&entry.platform)?;
    provider.initialize(entry.extra.clone()).await?;
    Ok(provider)
}

/// Set up every configured platform concurrently.
///
/// All initialisations are awaited before returning. A platform that fails is
/// logged and left out; the remaining providers are still served. When two
/// entries share a key the first one wins.
pub async fn setup_providers(
    entries: &[SttPlatformConfig],
    registry: &PlatformRegistry,
) -> Providers {
    let results = join_all(entries.iter().map(|entry| setup_platform(entry, registry))).await;

    let mut providers: HashMap<String, Arc<dyn SttProvider>> = HashMap::new();
    for (entry, result) in entries.iter().zip(results) {
        let key = entry.key();
        match result {
            Ok(provider) => {
                if providers.contains_key(key) {
                    tracing::warn!(provider = %key, "duplicate STT provider key, skipping");
                    continue;
                }
                tracing::info!(provider = %key, platform = %entry.platform, "STT provider ready");
                providers.insert(key.to_string(), Arc::from(provider));
            }
            Err(e) => {
                tracing::error!(platform = %entry.platform, "error setting up platform: {e}");
            }
        }
    }

    Providers {
        inner: Arc::new(providers),
    }
}
