//! In-memory tabular provider

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::Result;
use bizcore_domain::ports::providers::{Provider, ProviderConfig, TabularProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "memory";

/// Tabular provider keeping sheets in memory
#[derive(Debug, Default)]
pub struct MemoryTabularProvider {
    sheets: DashMap<String, Vec<Vec<String>>>,
}

impl MemoryTabularProvider {
    /// Create a provider with no sheets
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Provider for MemoryTabularProvider {
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
        self.sheets.clear();
        Ok(())
    }
}

#[async_trait]
impl TabularProvider for MemoryTabularProvider {
    async fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<()> {
        self.sheets.entry(sheet.to_string()).or_default().push(row);
        Ok(())
    }

    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .sheets
            .get(sheet)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.tabular.register(ProviderEntry::new(
        PROVIDER_NAME,
        "In-memory tabular provider for exports",
        |_config| {
            let provider: Arc<dyn TabularProvider> = Arc::new(MemoryTabularProvider::new());
            Ok(provider)
        },
    ));
}
