//! Noop translation provider
//!
//! Returns the input text unchanged. The documented default when no
//! translation backend is configured.

use std::sync::Arc;

use async_trait::async_trait;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::Result;
use bizcore_domain::ports::providers::{Provider, ProviderConfig, TranslationProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "noop";

/// Translation provider that performs no translation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTranslationProvider;

impl NoopTranslationProvider {
    /// Create a new noop translation provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for NoopTranslationProvider {
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
impl TranslationProvider for NoopTranslationProvider {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.translation.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Noop translation provider returning text unchanged",
        |_config| {
            let provider: Arc<dyn TranslationProvider> = Arc::new(NoopTranslationProvider::new());
            Ok(provider)
        },
    ));
}
