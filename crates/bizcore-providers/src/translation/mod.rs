//! Translation providers

mod noop;

pub use noop::NoopTranslationProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in translation providers
pub fn register(registry: &mut ProviderRegistry) {
    noop::register(registry);
}
