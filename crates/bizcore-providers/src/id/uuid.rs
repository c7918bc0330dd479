//! UUID id provider

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::Result;
use bizcore_domain::ports::providers::{IdProvider, Provider, ProviderConfig};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "uuid";

/// Id provider generating random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdProvider;

impl UuidIdProvider {
    /// Create a new UUID id provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for UuidIdProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn initialize(&self, _config: &ProviderConfig) -> Result<()> {
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

impl IdProvider for UuidIdProvider {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.id.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Random v4 UUID identifier provider",
        |_config| {
            let provider: Arc<dyn IdProvider> = Arc::new(UuidIdProvider::new());
            Ok(provider)
        },
    ));
}
