//! Auth providers

mod mock;

pub use mock::MockAuthProvider;

use bizcore_application::registry::ProviderRegistry;

/// Register the built-in auth providers
pub fn register(registry: &mut ProviderRegistry) {
    mock::register(registry);
}
