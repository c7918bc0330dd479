//! Database providers

mod memory;

pub use memory::MemoryDatabaseProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in database providers
pub fn register(registry: &mut ProviderRegistry) {
    memory::register(registry);
}
