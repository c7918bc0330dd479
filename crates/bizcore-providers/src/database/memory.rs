//! In-memory mock database
//!
//! A document store backed by a concurrent map, keyed by
//! (collection, id). The default database backend for development and
//! tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::Result;
use bizcore_domain::naming::CollectionNames;
use bizcore_domain::ports::providers::{DatabaseProvider, Provider, ProviderConfig};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "mock_db";

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryDatabaseProvider {
    documents: DashMap<(String, String), Value>,
}

impl MemoryDatabaseProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl Provider for MemoryDatabaseProvider {
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
        self.documents.clear();
        Ok(())
    }
}

#[async_trait]
impl DatabaseProvider for MemoryDatabaseProvider {
    async fn put_document(&self, collection: &str, id: &str, document: Value) -> Result<()> {
        self.documents
            .insert((collection.to_string(), id.to_string()), document);
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        Ok(self
            .documents
            .remove(&(collection.to_string(), id.to_string()))
            .is_some())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>> {
        let mut entries: Vec<(String, Value)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries.into_iter().map(|(_, doc)| doc).collect())
    }
}

/// Register this provider and its naming builder
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.database.register(ProviderEntry::new(
        PROVIDER_NAME,
        "In-memory mock database for development and tests",
        |_config| {
            let provider: Arc<dyn DatabaseProvider> = Arc::new(MemoryDatabaseProvider::new());
            Ok(provider)
        },
    ));
    registry.register_naming(PROVIDER_NAME, CollectionNames::default);
}
