//! Tabular providers

mod memory;

pub use memory::MemoryTabularProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in tabular providers
pub fn register(registry: &mut ProviderRegistry) {
    memory::register(registry);
}
