//! Configuration loading
//!
//! Provider selection is driven by environment-style keys whose names
//! are part of the compatibility surface:
//! `CONFIG_<CATEGORY>_PROVIDER`, `CONFIG_WORKFLOW_ENGINE_MODE` and
//! `BUSINESS_TYPE`. Every key follows value-or-default semantics with
//! the empty string treated as unset.
//!
//! Uses Figment to merge `AppConfig::default()` with the environment.

use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use bizcore_domain::error::{Error, Result};

/// Default database provider when `CONFIG_DATABASE_PROVIDER` is unset
pub const DEFAULT_DATABASE_PROVIDER: &str = "mock_db";
/// Default auth provider when `CONFIG_AUTH_PROVIDER` is unset
pub const DEFAULT_AUTH_PROVIDER: &str = "mock_auth";
/// Default storage provider when `CONFIG_STORAGE_PROVIDER` is unset
pub const DEFAULT_STORAGE_PROVIDER: &str = "noop";
/// Default id provider when `CONFIG_ID_PROVIDER` is unset
pub const DEFAULT_ID_PROVIDER: &str = "uuid";
/// Default translation provider when `CONFIG_TRANSLATION_PROVIDER` is unset
pub const DEFAULT_TRANSLATION_PROVIDER: &str = "noop";
/// Default workflow engine mode
pub const DEFAULT_ENGINE_MODE: &str = "eager";
/// Default business type
pub const DEFAULT_BUSINESS_TYPE: &str = "default";

fn default_health_interval_secs() -> u64 {
    300
}

fn default_health_timeout_secs() -> u64 {
    30
}

/// Application configuration
///
/// Raw string knobs exactly as configured; the accessor methods apply
/// the value-or-default semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database provider name (`CONFIG_DATABASE_PROVIDER`)
    #[serde(default)]
    pub database_provider: String,
    /// Auth provider name (`CONFIG_AUTH_PROVIDER`)
    #[serde(default)]
    pub auth_provider: String,
    /// Storage provider name (`CONFIG_STORAGE_PROVIDER`)
    #[serde(default)]
    pub storage_provider: String,
    /// Id provider name (`CONFIG_ID_PROVIDER`)
    #[serde(default)]
    pub id_provider: String,
    /// Email provider name (`CONFIG_EMAIL_PROVIDER`), unset = disabled
    #[serde(default)]
    pub email_provider: String,
    /// Payment provider name (`CONFIG_PAYMENT_PROVIDER`), unset = disabled
    #[serde(default)]
    pub payment_provider: String,
    /// Scheduler provider name (`CONFIG_SCHEDULER_PROVIDER`), unset = disabled
    #[serde(default)]
    pub scheduler_provider: String,
    /// Tabular provider name (`CONFIG_TABULAR_PROVIDER`), unset = disabled
    #[serde(default)]
    pub tabular_provider: String,
    /// Translation provider name (`CONFIG_TRANSLATION_PROVIDER`)
    #[serde(default)]
    pub translation_provider: String,
    /// Workflow engine binding mode (`CONFIG_WORKFLOW_ENGINE_MODE`)
    #[serde(default)]
    pub workflow_engine_mode: String,
    /// Business type of the deployment (`BUSINESS_TYPE`)
    #[serde(default)]
    pub business_type: String,
    /// Health check loop interval in seconds
    #[serde(default = "default_health_interval_secs")]
    pub health_interval_secs: u64,
    /// Per-provider health check timeout in seconds
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_provider: String::new(),
            auth_provider: String::new(),
            storage_provider: String::new(),
            id_provider: String::new(),
            email_provider: String::new(),
            payment_provider: String::new(),
            scheduler_provider: String::new(),
            tabular_provider: String::new(),
            translation_provider: String::new(),
            workflow_engine_mode: String::new(),
            business_type: String::new(),
            health_interval_secs: default_health_interval_secs(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

impl AppConfig {
    /// Database provider name, with default
    pub fn database_provider(&self) -> &str {
        non_empty(&self.database_provider).unwrap_or(DEFAULT_DATABASE_PROVIDER)
    }

    /// Auth provider name, with default
    pub fn auth_provider(&self) -> &str {
        non_empty(&self.auth_provider).unwrap_or(DEFAULT_AUTH_PROVIDER)
    }

    /// Storage provider name, with default
    pub fn storage_provider(&self) -> &str {
        non_empty(&self.storage_provider).unwrap_or(DEFAULT_STORAGE_PROVIDER)
    }

    /// Id provider name, with default
    pub fn id_provider(&self) -> &str {
        non_empty(&self.id_provider).unwrap_or(DEFAULT_ID_PROVIDER)
    }

    /// Email provider name, `None` when unconfigured
    pub fn email_provider(&self) -> Option<&str> {
        non_empty(&self.email_provider)
    }

    /// Payment provider name, `None` when unconfigured
    pub fn payment_provider(&self) -> Option<&str> {
        non_empty(&self.payment_provider)
    }

    /// Scheduler provider name, `None` when unconfigured
    pub fn scheduler_provider(&self) -> Option<&str> {
        non_empty(&self.scheduler_provider)
    }

    /// Tabular provider name, `None` when unconfigured
    pub fn tabular_provider(&self) -> Option<&str> {
        non_empty(&self.tabular_provider)
    }

    /// Translation provider name, with noop default
    pub fn translation_provider(&self) -> Option<&str> {
        Some(non_empty(&self.translation_provider).unwrap_or(DEFAULT_TRANSLATION_PROVIDER))
    }

    /// Workflow engine mode string, with default
    pub fn workflow_engine_mode(&self) -> &str {
        non_empty(&self.workflow_engine_mode).unwrap_or(DEFAULT_ENGINE_MODE)
    }

    /// Business type, with default
    pub fn business_type(&self) -> &str {
        non_empty(&self.business_type).unwrap_or(DEFAULT_BUSINESS_TYPE)
    }

    /// Health loop interval
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    /// Per-provider health check timeout
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs.max(1))
    }
}

/// Configuration loader service
///
/// Merge order (later overrides earlier):
/// 1. `AppConfig::default()`
/// 2. `CONFIG_*` environment variables
/// 3. `BUSINESS_TYPE`
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from defaults and the environment
    pub fn load(&self) -> Result<AppConfig> {
        let figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Env::prefixed("CONFIG_"))
            .merge(Env::raw().only(&["business_type"]));

        figment.extract().map_err(|e| Error::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }
}
