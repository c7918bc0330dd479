//! Composition root
//!
//! The single place where the provider registry is populated and the
//! container assembled. Binaries call [`init_app_from_env`]; tests call
//! [`init_app`] with a hand-built configuration.

use std::sync::Arc;

use tracing::info;

use bizcore_application::registry::ProviderRegistry;
use bizcore_domain::error::Result;
use bizcore_providers::register_builtin_providers;

use crate::config::{AppConfig, ConfigLoader};
use crate::container::Container;

/// Build the registry with every built-in provider registered
pub fn build_registry() -> Arc<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    register_builtin_providers(&mut registry);
    Arc::new(registry)
}

/// Assemble and initialize a container from the given configuration
///
/// Startup failures degrade the container instead of aborting the
/// process; only reentrant initialization errors propagate.
pub async fn init_app(config: AppConfig) -> Result<Arc<Container>> {
    let container = Arc::new(Container::new(build_registry(), config));
    container.initialize_or_degrade().await?;
    if container.is_degraded().await {
        info!("application started in degraded mode");
    } else {
        info!("application started");
    }
    Ok(container)
}

/// Assemble and initialize a container from the process environment
pub async fn init_app_from_env() -> Result<Arc<Container>> {
    let config = ConfigLoader::new().load()?;
    init_app(config).await
}
