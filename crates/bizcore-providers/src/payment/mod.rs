//! Payment providers

mod mock;

pub use mock::MockPaymentProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in payment providers
pub fn register(registry: &mut ProviderRegistry) {
    mock::register(registry);
}
