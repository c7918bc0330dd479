//! Email providers

mod log;

pub use log::LogEmailProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in email providers
pub fn register(registry: &mut ProviderRegistry) {
    log::register(registry);
}
