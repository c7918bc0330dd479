//! Id providers

mod uuid;

pub use self::uuid::UuidIdProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in id providers
pub fn register(registry: &mut ProviderRegistry) {
    self::uuid::register(registry);
}
