//! Scheduler providers

mod memory;

pub use memory::MemorySchedulerProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in scheduler providers
pub fn register(registry: &mut ProviderRegistry) {
    memory::register(registry);
}
