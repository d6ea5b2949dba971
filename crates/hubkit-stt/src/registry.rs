use crate::provider_trait::SttProvider;
use hubkit_core::SttError;
use std::collections::HashMap;

pub struct PlatformRegistry {
    factories: HashMap<String, fn() -> Box<dyn SttProvider>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("demo", || Box::new(crate::demo_provider::DemoProvider::new()));
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn SttProvider>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn SttProvider>, SttError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| SttError::PlatformNotFound(name.to_string()))
    }

    pub fn list_platforms(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DemoProvider;

    #[test]
    fn test_registry_new_has_demo_platform() {
        let registry = PlatformRegistry::new();
        assert!(registry.create("demo").is_ok());
    }

    #[test]
    fn test_registry_create_demo_returns_correct_name() {
        let registry = PlatformRegistry::new();
        let provider = registry.create("demo").unwrap();
        assert_eq!(provider.name(), "demo");
    }

    #[test]
    fn test_registry_create_unknown_returns_error() {
        let registry = PlatformRegistry::new();
        match registry.create("nope") {
            Err(SttError::PlatformNotFound(name)) => assert_eq!(name, "nope"),
            _ => panic!("expected PlatformNotFound error"),
        }
    }

    #[test]
    fn test_registry_register_custom_platform() {
        let mut registry = PlatformRegistry::new();
        registry.register("custom", || Box::new(DemoProvider::new()));
        let provider = registry.create("custom").unwrap();
        // DemoProvider backs the factory, so the platform name is still "demo"
        assert_eq!(provider.name(), "demo");
    }

    #[test]
    fn test_registry_list_platforms_includes_demo() {
        let registry = PlatformRegistry::new();
        assert!(registry.list_platforms().contains(&"demo"));
    }
}
