//! Provider manager
//!
//! Owns one initialized instance per configured provider category and the
//! background health loop probing them. Core categories (database, auth,
//! storage, id) are fail-fast: a construction or initialization error
//! aborts startup. Integration categories (email, payment, scheduler,
//! tabular, translation) are best-effort: a failure logs a warning and
//! leaves the slot empty.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use bizcore_application::registry::ProviderRegistry;
use bizcore_domain::error::{Error, Result, ResultExt};
use bizcore_domain::naming::CollectionNames;
use bizcore_domain::ports::providers::{
    AuthProvider, DatabaseProvider, EmailProvider, IdProvider, PaymentProvider, Provider,
    ProviderConfig, SchedulerProvider, StorageProvider, TabularProvider, TranslationProvider,
};

use crate::config::AppConfig;
use crate::health::ProviderHealth;

/// One pending provider operation: (category, provider name, future)
type ProviderOp = (&'static str, String, BoxFuture<'static, Result<()>>);

fn health_op<P>(category: &'static str, provider: &Arc<P>) -> ProviderOp
where
    P: Provider + ?Sized + 'static,
{
    let name = provider.name().to_string();
    let provider = Arc::clone(provider);
    (category, name, async move { provider.health().await }.boxed())
}

fn close_op<P>(category: &'static str, provider: &Arc<P>) -> ProviderOp
where
    P: Provider + ?Sized + 'static,
{
    let name = provider.name().to_string();
    let provider = Arc::clone(provider);
    (category, name, async move { provider.close().await }.boxed())
}

/// Holds the active provider set and its health state
pub struct ProviderManager {
    database: Arc<dyn DatabaseProvider>,
    auth: Arc<dyn AuthProvider>,
    storage: Arc<dyn StorageProvider>,
    id: Arc<dyn IdProvider>,
    email: Option<Arc<dyn EmailProvider>>,
    payment: Option<Arc<dyn PaymentProvider>>,
    scheduler: Option<Arc<dyn SchedulerProvider>>,
    tabular: Option<Arc<dyn TabularProvider>>,
    translation: Option<Arc<dyn TranslationProvider>>,
    names: CollectionNames,
    health: Arc<RwLock<HashMap<String, ProviderHealth>>>,
    stop: Notify,
    stopping: AtomicBool,
    closed: AtomicBool,
    health_task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ProviderManager {
    /// Build and initialize the four core providers
    ///
    /// Fail-fast: the first error closes whatever already came up, in
    /// reverse order, and is returned to the caller. The naming set is
    /// derived from the active database backend, with the default names
    /// as fallback.
    pub async fn build_core(registry: &ProviderRegistry, config: &AppConfig) -> Result<Self> {
        let business_type = config.business_type();
        let provider_config =
            |name: &str| ProviderConfig::new(name).with_business_type(business_type);

        let database = registry
            .database
            .build(
                config.database_provider(),
                &provider_config(config.database_provider()),
            )
            .await
            .context("database provider startup failed")?;

        let auth = match registry
            .auth
            .build(config.auth_provider(), &provider_config(config.auth_provider()))
            .await
            .context("auth provider startup failed")
        {
            Ok(provider) => provider,
            Err(e) => {
                let _ = database.close().await;
                return Err(e);
            }
        };

        let storage = match registry
            .storage
            .build(
                config.storage_provider(),
                &provider_config(config.storage_provider()),
            )
            .await
            .context("storage provider startup failed")
        {
            Ok(provider) => provider,
            Err(e) => {
                let _ = auth.close().await;
                let _ = database.close().await;
                return Err(e);
            }
        };

        let id = match registry
            .id
            .build(config.id_provider(), &provider_config(config.id_provider()))
            .await
            .context("id provider startup failed")
        {
            Ok(provider) => provider,
            Err(e) => {
                let _ = storage.close().await;
                let _ = auth.close().await;
                let _ = database.close().await;
                return Err(e);
            }
        };

        let names = registry
            .naming_for(database.name())
            .unwrap_or_default();

        info!(
            database = database.name(),
            auth = auth.name(),
            storage = storage.name(),
            id = id.name(),
            "core providers initialized"
        );

        Ok(Self {
            database,
            auth,
            storage,
            id,
            email: None,
            payment: None,
            scheduler: None,
            tabular: None,
            translation: None,
            names,
            health: Arc::new(RwLock::new(HashMap::new())),
            stop: Notify::new(),
            stopping: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            health_task: std::sync::Mutex::new(None),
        })
    }

    /// Build the configured integration providers, best-effort
    ///
    /// An unconfigured category is skipped silently; a configured one that
    /// fails to build logs a warning and stays empty. Never returns an
    /// error.
    pub async fn build_integrations(&mut self, registry: &ProviderRegistry, config: &AppConfig) {
        let business_type = config.business_type();
        let provider_config = |name: &str| {
            ProviderConfig::new(name).with_business_type(business_type)
        };

        if let Some(name) = config.email_provider() {
            match registry.email.build(name, &provider_config(name)).await {
                Ok(provider) => self.email = Some(provider),
                Err(e) => warn!(provider = name, error = %e, "email provider unavailable"),
            }
        }
        if let Some(name) = config.payment_provider() {
            match registry.payment.build(name, &provider_config(name)).await {
                Ok(provider) => self.payment = Some(provider),
                Err(e) => warn!(provider = name, error = %e, "payment provider unavailable"),
            }
        }
        if let Some(name) = config.scheduler_provider() {
            match registry.scheduler.build(name, &provider_config(name)).await {
                Ok(provider) => self.scheduler = Some(provider),
                Err(e) => warn!(provider = name, error = %e, "scheduler provider unavailable"),
            }
        }
        if let Some(name) = config.tabular_provider() {
            match registry.tabular.build(name, &provider_config(name)).await {
                Ok(provider) => self.tabular = Some(provider),
                Err(e) => warn!(provider = name, error = %e, "tabular provider unavailable"),
            }
        }
        if let Some(name) = config.translation_provider() {
            match registry.translation.build(name, &provider_config(name)).await {
                Ok(provider) => self.translation = Some(provider),
                Err(e) => warn!(provider = name, error = %e, "translation provider unavailable"),
            }
        }
    }

    fn health_ops(&self) -> Vec<ProviderOp> {
        let mut ops = vec![
            health_op("database", &self.database),
            health_op("auth", &self.auth),
            health_op("storage", &self.storage),
            health_op("id", &self.id),
        ];
        if let Some(p) = &self.email {
            ops.push(health_op("email", p));
        }
        if let Some(p) = &self.payment {
            ops.push(health_op("payment", p));
        }
        if let Some(p) = &self.scheduler {
            ops.push(health_op("scheduler", p));
        }
        if let Some(p) = &self.tabular {
            ops.push(health_op("tabular", p));
        }
        if let Some(p) = &self.translation {
            ops.push(health_op("translation", p));
        }
        ops
    }

    fn close_ops(&self) -> Vec<ProviderOp> {
        let mut ops = vec![
            close_op("database", &self.database),
            close_op("auth", &self.auth),
            close_op("storage", &self.storage),
            close_op("id", &self.id),
        ];
        if let Some(p) = &self.email {
            ops.push(close_op("email", p));
        }
        if let Some(p) = &self.payment {
            ops.push(close_op("payment", p));
        }
        if let Some(p) = &self.scheduler {
            ops.push(close_op("scheduler", p));
        }
        if let Some(p) = &self.tabular {
            ops.push(close_op("tabular", p));
        }
        if let Some(p) = &self.translation {
            ops.push(close_op("translation", p));
        }
        ops
    }

    /// Probe every managed provider once and refresh the snapshot
    pub async fn run_health_checks(&self, timeout: Duration) {
        let mut snapshot = HashMap::new();
        for (category, name, op) in self.health_ops() {
            let record = match tokio::time::timeout(timeout, op).await {
                Ok(Ok(())) => {
                    debug!(category, provider = %name, "health check passed");
                    ProviderHealth::healthy(category, &name)
                }
                Ok(Err(e)) => {
                    warn!(category, provider = %name, error = %e, "health check failed");
                    ProviderHealth::failed(category, &name, e.to_string())
                }
                Err(_) => {
                    warn!(category, provider = %name, "health check timed out");
                    ProviderHealth::failed(category, &name, "health check timed out")
                }
            };
            snapshot.insert(format!("{category}:{name}"), record);
        }
        *self.health.write().await = snapshot;
    }

    /// Start the background health loop
    ///
    /// Runs one immediate pass, then one per interval until
    /// [`ProviderManager::close`] stops it.
    pub fn spawn_health_loop(self: &Arc<Self>, interval: Duration, timeout: Duration) {
        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if manager.stopping.load(Ordering::SeqCst) {
                            break;
                        }
                        manager.run_health_checks(timeout).await;
                    }
                    _ = manager.stop.notified() => break,
                }
            }
            debug!("health loop stopped");
        });

        let mut guard = self
            .health_task
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(handle);
    }

    async fn stop_health_loop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.stop.notify_one();
        let handle = {
            let mut guard = self
                .health_task
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            guard.take()
        };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Close every provider exactly once
    ///
    /// Idempotent: the first call performs the shutdown, later calls
    /// return `Ok` immediately. Every provider's `close` runs even when
    /// earlier ones fail; failures are collected into a single aggregate
    /// error.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.stop_health_loop().await;

        let mut errors = Vec::new();
        for (category, name, op) in self.close_ops() {
            if let Err(e) = op.await {
                warn!(category, provider = %name, error = %e, "provider close failed");
                errors.push(Error::provider(format!(
                    "{category} provider {name} close failed: {e}"
                )));
            }
        }

        if errors.is_empty() {
            info!("provider manager closed");
            Ok(())
        } else {
            Err(Error::Shutdown { errors })
        }
    }

    /// Whether [`ProviderManager::close`] has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Active database provider
    pub fn database(&self) -> Arc<dyn DatabaseProvider> {
        Arc::clone(&self.database)
    }

    /// Active auth provider
    pub fn auth(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.auth)
    }

    /// Active storage provider
    pub fn storage(&self) -> Arc<dyn StorageProvider> {
        Arc::clone(&self.storage)
    }

    /// Active id provider
    pub fn ids(&self) -> Arc<dyn IdProvider> {
        Arc::clone(&self.id)
    }

    /// Active email provider, if configured
    pub fn email(&self) -> Option<Arc<dyn EmailProvider>> {
        self.email.as_ref().map(Arc::clone)
    }

    /// Active payment provider, if configured
    pub fn payment(&self) -> Option<Arc<dyn PaymentProvider>> {
        self.payment.as_ref().map(Arc::clone)
    }

    /// Active scheduler provider, if configured
    pub fn scheduler(&self) -> Option<Arc<dyn SchedulerProvider>> {
        self.scheduler.as_ref().map(Arc::clone)
    }

    /// Active tabular provider, if configured
    pub fn tabular(&self) -> Option<Arc<dyn TabularProvider>> {
        self.tabular.as_ref().map(Arc::clone)
    }

    /// Active translation provider, if configured
    pub fn translation(&self) -> Option<Arc<dyn TranslationProvider>> {
        self.translation.as_ref().map(Arc::clone)
    }

    /// Naming set derived from the active database backend
    pub fn collection_names(&self) -> &CollectionNames {
        &self.names
    }

    /// Latest health snapshot, keyed by `category:provider`
    pub async fn health_snapshot(&self) -> HashMap<String, ProviderHealth> {
        self.health.read().await.clone()
    }
}

impl std::fmt::Debug for ProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderManager")
            .field("database", &self.database.name())
            .field("auth", &self.auth.name())
            .field("storage", &self.storage.name())
            .field("id", &self.id.name())
            .field("email", &self.email.as_ref().map(|p| p.name().to_string()))
            .field("payment", &self.payment.as_ref().map(|p| p.name().to_string()))
            .field(
                "scheduler",
                &self.scheduler.as_ref().map(|p| p.name().to_string()),
            )
            .field("tabular", &self.tabular.as_ref().map(|p| p.name().to_string()))
            .field(
                "translation",
                &self.translation.as_ref().map(|p| p.name().to_string()),
            )
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
