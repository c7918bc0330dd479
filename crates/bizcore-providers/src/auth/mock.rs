//! Mock auth provider
//!
//! Accepts any non-empty token and derives the principal from it. The
//! documented default when no auth backend is configured.

use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{AuthProvider, Principal, Provider, ProviderConfig};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "mock_auth";

/// Auth provider that trusts every non-empty token
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    tenant: RwLock<String>,
}

impl MockAuthProvider {
    /// Create a provider with the default tenant
    pub fn new() -> Self {
        Self {
            tenant: RwLock::new("default".to_string()),
        }
    }

    fn tenant(&self) -> String {
        self.tenant
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Provider for MockAuthProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn initialize(&self, config: &ProviderConfig) -> Result<()> {
        if !config.business_type.is_empty() {
            *self
                .tenant
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner) =
                config.business_type.clone();
        }
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
impl AuthProvider for MockAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<Principal> {
        if token.is_empty() {
            return Err(Error::authentication("empty token"));
        }
        Ok(Principal {
            subject: token.to_string(),
            tenant: self.tenant(),
            roles: vec!["user".to_string()],
        })
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.auth.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Mock auth provider accepting any non-empty token",
        |_config| {
            let provider: Arc<dyn AuthProvider> = Arc::new(MockAuthProvider::new());
            Ok(provider)
        },
    ));
}
