//! Noop storage provider
//!
//! Accepts every write and stores nothing. The documented default when
//! no storage backend is configured.

use std::sync::Arc;

use async_trait::async_trait;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::Result;
use bizcore_domain::ports::providers::{Provider, ProviderConfig, StorageProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "noop";

/// Storage provider that discards all data
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorageProvider;

impl NoopStorageProvider {
    /// Create a new noop storage provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for NoopStorageProvider {
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

#[async_trait]
impl StorageProvider for NoopStorageProvider {
    async fn put_object(&self, _key: &str, _bytes: Vec<u8>) -> Result<()> {
        // accept the write but store nothing
        Ok(())
    }

    async fn get_object(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn delete_object(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.storage.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Noop storage provider that discards all objects",
        |_config| {
            let provider: Arc<dyn StorageProvider> = Arc::new(NoopStorageProvider::new());
            Ok(provider)
        },
    ));
}
