//! Provider Registry
//!
//! An explicit registry object resolving named backend implementations
//! from configuration strings. The registry is constructed once at the
//! composition root, populated by each provider package's `register`
//! entry point, then wrapped in an `Arc` and shared read-only - all
//! writes complete before any concurrent reader exists, so reads take
//! no lock.
//!
//! ## Usage
//!
//! ### Registering a provider (in bizcore-providers)
//!
//! ```ignore
//! registry.database.register(ProviderEntry::new(
//!     "mock_db",
//!     "In-memory mock database",
//!     |_config| Ok(Arc::new(MemoryDatabaseProvider::new()) as Arc<dyn DatabaseProvider>),
//! ));
//! ```
//!
//! ### Resolving a provider (in bizcore-infrastructure)
//!
//! ```ignore
//! let config = ProviderConfig::new("mock_db");
//! let provider = registry.database.build("mock_db", &config).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use bizcore_domain::error::{Error, Result, ResultExt};
use bizcore_domain::naming::CollectionNames;
use bizcore_domain::ports::providers::{
    AuthProvider, DatabaseProvider, EmailProvider, IdProvider, PaymentProvider, Provider,
    ProviderConfig, SchedulerProvider, StorageProvider, TabularProvider, TranslationProvider,
};

/// Factory closure producing one provider instance
pub type ProviderFactory<P> = Box<dyn Fn(&ProviderConfig) -> Result<Arc<P>> + Send + Sync>;

/// Builder producing the naming set for one database backend
pub type NamingBuilder = fn() -> CollectionNames;

/// Registry entry for one named provider implementation
///
/// Immutable once registered; registered exactly once per
/// (category, name).
pub struct ProviderEntry<P: ?Sized> {
    /// Canonical provider name (e.g. "mock_db", "noop")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory producing an unconfigured instance
    pub factory: ProviderFactory<P>,
}

impl<P: ?Sized> ProviderEntry<P> {
    /// Create a new entry
    pub fn new(
        name: &'static str,
        description: &'static str,
        factory: impl Fn(&ProviderConfig) -> Result<Arc<P>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            description,
            factory: Box::new(factory),
        }
    }
}

/// Append-only map from provider name to factory for one category
pub struct CategoryRegistry<P: ?Sized> {
    category: &'static str,
    entries: Vec<ProviderEntry<P>>,
}

impl<P> CategoryRegistry<P>
where
    P: Provider + ?Sized,
{
    fn new(category: &'static str) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    /// Category name (e.g. "database")
    pub fn category(&self) -> &'static str {
        self.category
    }

    /// Register a provider entry
    ///
    /// Duplicate registration of the same (category, name) is programmer
    /// error and panics.
    pub fn register(&mut self, entry: ProviderEntry<P>) {
        if self.entries.iter().any(|e| e.name == entry.name) {
            panic!(
                "duplicate provider registration: {}:{}",
                self.category, entry.name
            );
        }
        self.entries.push(entry);
    }

    /// Look up an entry by name
    pub fn lookup(&self, name: &str) -> Option<&ProviderEntry<P>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// List all registered (name, description) pairs
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        self.entries.iter().map(|e| (e.name, e.description)).collect()
    }

    /// Build and initialize the named provider
    ///
    /// Looks up the factory, invokes it, lets the instance self-configure
    /// via its own `initialize`, and returns it ready for use. Returns a
    /// hard error when no factory is registered for the name - there is
    /// no silent substitution at this level.
    pub async fn build(&self, name: &str, config: &ProviderConfig) -> Result<Arc<P>> {
        let Some(entry) = self.lookup(name) else {
            return Err(Error::UnsupportedProvider {
                category: self.category.to_string(),
                name: name.to_string(),
            });
        };

        let provider = (entry.factory)(config)
            .context(format!("failed to construct {} provider {name}", self.category))?;
        provider
            .initialize(config)
            .await
            .context(format!("failed to initialize {} provider {name}", self.category))?;

        Ok(provider)
    }
}

/// Process-wide provider registry, one sub-registry per category
///
/// Also carries the naming builders keyed by database provider name:
/// the provider manager derives its table/collection naming set from the
/// active database backend through [`ProviderRegistry::naming_for`].
pub struct ProviderRegistry {
    /// Database backends (core, fail-fast)
    pub database: CategoryRegistry<dyn DatabaseProvider>,
    /// Auth backends (core, fail-fast)
    pub auth: CategoryRegistry<dyn AuthProvider>,
    /// Storage backends (core, fail-fast)
    pub storage: CategoryRegistry<dyn StorageProvider>,
    /// Id backends (core, fail-fast)
    pub id: CategoryRegistry<dyn IdProvider>,
    /// Email backends (integration, best-effort)
    pub email: CategoryRegistry<dyn EmailProvider>,
    /// Payment backends (integration, best-effort)
    pub payment: CategoryRegistry<dyn PaymentProvider>,
    /// Scheduler backends (integration, best-effort)
    pub scheduler: CategoryRegistry<dyn SchedulerProvider>,
    /// Tabular backends (integration, best-effort)
    pub tabular: CategoryRegistry<dyn TabularProvider>,
    /// Translation backends (integration, best-effort)
    pub translation: CategoryRegistry<dyn TranslationProvider>,
    naming: HashMap<&'static str, NamingBuilder>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            database: CategoryRegistry::new("database"),
            auth: CategoryRegistry::new("auth"),
            storage: CategoryRegistry::new("storage"),
            id: CategoryRegistry::new("id"),
            email: CategoryRegistry::new("email"),
            payment: CategoryRegistry::new("payment"),
            scheduler: CategoryRegistry::new("scheduler"),
            tabular: CategoryRegistry::new("tabular"),
            translation: CategoryRegistry::new("translation"),
            naming: HashMap::new(),
        }
    }

    /// Register the naming builder for a database backend
    pub fn register_naming(&mut self, db_name: &'static str, builder: NamingBuilder) {
        if self.naming.insert(db_name, builder).is_some() {
            panic!("duplicate naming registration for database provider {db_name}");
        }
    }

    /// Derive the naming set for the given database backend, if one was
    /// registered
    pub fn naming_for(&self, db_name: &str) -> Option<CollectionNames> {
        self.naming.get(db_name).map(|builder| builder())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("database", &self.database.list())
            .field("auth", &self.auth.list())
            .field("storage", &self.storage.list())
            .field("id", &self.id.list())
            .field("email", &self.email.list())
            .field("payment", &self.payment.list())
            .field("scheduler", &self.scheduler.list())
            .field("tabular", &self.tabular.list())
            .field("translation", &self.translation.list())
            .finish_non_exhaustive()
    }
}
