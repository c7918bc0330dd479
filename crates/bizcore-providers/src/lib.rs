//! Built-in provider implementations
//!
//! Mock and noop backends for every category, suitable for development,
//! tests and partially-configured deployments. Each module exposes a
//! `register` entry point; the composition root calls
//! [`register_builtin_providers`] exactly once before sharing the
//! registry.

pub mod auth;
pub mod database;
pub mod email;
pub mod id;
pub mod payment;
pub mod scheduler;
pub mod storage;
pub mod tabular;
pub mod translation;

use bizcore_application::registry::ProviderRegistry;

/// Register every built-in provider into the given registry
///
/// Called once from the composition root, before the registry is wrapped
/// in an `Arc` and shared.
pub fn register_builtin_providers(registry: &mut ProviderRegistry) {
    database::register(registry);
    auth::register(registry);
    storage::register(registry);
    id::register(registry);
    email::register(registry);
    payment::register(registry);
    scheduler::register(registry);
    tabular::register(registry);
    translation::register(registry);
}
