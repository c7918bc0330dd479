//! Storage providers

mod noop;

pub use noop::NoopStorageProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in storage providers
pub fn register(registry: &mut ProviderRegistry) {
    noop::register(registry);
}
