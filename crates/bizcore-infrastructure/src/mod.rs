//! Infrastructure layer for bizcore
//!
//! The provider composition runtime: configuration loading, the provider
//! manager with its health loop, the container lifecycle, the workflow
//! engine binder, routing composition and the composition root.

pub mod binder;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod health;
pub mod logging;
pub mod manager;
pub mod routing;

pub use binder::{EngineBinding, bind_workflow_engine};
pub use bootstrap::{build_registry, init_app, init_app_from_env};
pub use config::{AppConfig, ConfigLoader};
pub use container::Container;
pub use health::{HealthStatus, ProviderHealth};
pub use logging::{LoggingConfig, init_logging, parse_log_level};
pub use manager::ProviderManager;
pub use routing::{CrudRouteComposer, RouteComposer, RouteEntry, RouteManager};
