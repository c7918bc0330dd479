//! Log email provider
//!
//! Writes every message to the structured log instead of sending it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{EmailMessage, EmailProvider, Provider, ProviderConfig};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "log";

/// Email provider that logs instead of sending
#[derive(Debug, Default)]
pub struct LogEmailProvider {
    sent: AtomicU64,
}

impl LogEmailProvider {
    /// Create a new log email provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages accepted so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Provider for LogEmailProvider {
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
impl EmailProvider for LogEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        if message.to.is_empty() {
            return Err(Error::invalid_argument("email recipient must not be empty"));
        }
        self.sent.fetch_add(1, Ordering::Relaxed);
        info!(to = %message.to, subject = %message.subject, "email sent (log provider)");
        Ok(())
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.email.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Email provider that writes messages to the log",
        |_config| {
            let provider: Arc<dyn EmailProvider> = Arc::new(LogEmailProvider::new());
            Ok(provider)
        },
    ));
}
