//! Application container
//!
//! Owns the whole provider composition for one process: configuration,
//! the provider manager, the use-case aggregate, the route table and the
//! workflow engine slot. Initialization runs in explicit ordered phases
//! under a single state lock; route composition runs outside the lock
//! because composers call back into the container's read accessors.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{info, warn};

use bizcore_application::registry::ProviderRegistry;
use bizcore_application::use_cases::{UseCaseDeps, UseCases};
use bizcore_application::workflow::{EngineFactory, WorkflowEngine};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{
    AuthProvider, DatabaseProvider, EmailProvider, IdProvider, PaymentProvider, StorageProvider,
};

use crate::binder::{EngineBinding, bind_workflow_engine};
use crate::config::AppConfig;
use crate::health::ProviderHealth;
use crate::manager::ProviderManager;
use crate::routing::{CrudRouteComposer, RouteComposer, RouteManager};

#[derive(Default)]
struct ContainerState {
    config: AppConfig,
    manager: Option<Arc<ProviderManager>>,
    use_cases: Option<Arc<UseCases>>,
    routes: Option<Arc<RouteManager>>,
    initializing: bool,
    initialized: bool,
    degraded: bool,
    closed: bool,
}

/// The application container
///
/// Lifecycle: `new` -> `initialize` (once) -> serve -> `close` (idempotent).
/// Initialization phases, in order:
///
/// 1. core providers (fail-fast)
/// 2. integration providers (best-effort) and the health loop
/// 3. use-case aggregate (fail-fast)
/// 4. workflow engine binding (failure leaves the engine unbound)
/// 5. route composition
pub struct Container {
    registry: Arc<ProviderRegistry>,
    state: RwLock<ContainerState>,
    engine: OnceCell<Arc<dyn WorkflowEngine>>,
    engine_factory: Mutex<Option<EngineFactory>>,
}

impl Container {
    /// Create an uninitialized container
    pub fn new(registry: Arc<ProviderRegistry>, config: AppConfig) -> Self {
        Self {
            registry,
            state: RwLock::new(ContainerState {
                config,
                ..ContainerState::default()
            }),
            engine: OnceCell::new(),
            engine_factory: Mutex::new(None),
        }
    }

    /// Provider registry this container resolves from
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Initialize with the default CRUD route composer
    pub async fn initialize(&self) -> Result<()> {
        self.initialize_with(&CrudRouteComposer::new()).await
    }

    /// Run the ordered initialization phases
    ///
    /// Not reentrant: a second call fails with `already initialized`
    /// whether the first succeeded or is still running. On failure every
    /// provider that already came up is closed and its health loop
    /// stopped, so a later retry starts from a clean slate.
    pub async fn initialize_with(&self, composer: &dyn RouteComposer) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if state.closed {
                return Err(Error::config("container is closed"));
            }
            if state.initialized || state.initializing {
                return Err(Error::AlreadyInitialized);
            }
            state.initializing = true;
        }

        if let Err(e) = self.run_init_phases(composer).await {
            self.teardown_failed_init().await;
            return Err(e);
        }

        let mut state = self.state.write().await;
        state.initializing = false;
        state.initialized = true;
        state.degraded = false;
        info!(
            business_type = state.config.business_type(),
            routes = state.routes.as_ref().map_or(0, |r| r.len()),
            "container initialized"
        );
        Ok(())
    }

    async fn teardown_failed_init(&self) {
        let manager = {
            let mut state = self.state.write().await;
            state.initializing = false;
            state.use_cases = None;
            state.routes = None;
            state.manager.take()
        };
        *self.engine_factory.lock().await = None;
        if let Some(manager) = manager {
            if let Err(e) = manager.close().await {
                warn!(error = %e, "cleanup after failed initialization");
            }
        }
    }

    async fn run_init_phases(&self, composer: &dyn RouteComposer) -> Result<()> {
        let binding = {
            let mut state = self.state.write().await;

            // Phase 1: core providers, fail-fast.
            let mut manager = ProviderManager::build_core(&self.registry, &state.config).await?;

            // Phase 2: integrations, best-effort, then the health loop.
            manager.build_integrations(&self.registry, &state.config).await;
            let manager = Arc::new(manager);
            manager.spawn_health_loop(state.config.health_interval(), state.config.health_timeout());
            // Stored immediately so a later phase failure still tears
            // it down.
            state.manager = Some(Arc::clone(&manager));

            // Phase 3: use-case aggregate, fail-fast.
            let use_cases = Arc::new(UseCases::new(UseCaseDeps {
                business_type: state.config.business_type().to_string(),
                names: manager.collection_names().clone(),
                database: manager.database(),
                auth: manager.auth(),
                ids: manager.ids(),
                email: manager.email(),
                payment: manager.payment(),
            })?);

            // Phase 4: workflow engine binding. A binding error leaves the
            // engine unbound; the container still comes up.
            let binding = match bind_workflow_engine(&state.config, Arc::clone(&use_cases)) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    warn!(error = %e, "workflow engine left unbound");
                    None
                }
            };

            state.use_cases = Some(use_cases);
            // Lock released before route composition: composers read back
            // through the container's accessors.
            binding
        };

        // Phase 5: route composition.
        let routes = composer.compose(self).await?;
        self.state.write().await.routes = Some(Arc::new(routes));

        // The binding is committed only now: a failed phase must not
        // leave an engine built over providers that get torn down.
        match binding {
            Some(EngineBinding::Built(engine)) => {
                if self.engine.set(engine).is_err() {
                    warn!("workflow engine already bound, keeping the existing one");
                }
            }
            Some(EngineBinding::Deferred(factory)) => {
                *self.engine_factory.lock().await = Some(factory);
            }
            None => {}
        }
        Ok(())
    }

    /// Initialize, falling back to degraded mode on failure
    ///
    /// A failed initialization already tore its providers down; this
    /// wrapper mounts the minimal health-only route table and marks the
    /// container degraded but initialized. Reentrant initialization
    /// still fails hard.
    pub async fn initialize_or_degrade(&self) -> Result<()> {
        match self.initialize().await {
            Ok(()) => Ok(()),
            Err(Error::AlreadyInitialized) => Err(Error::AlreadyInitialized),
            Err(e) => {
                warn!(error = %e, "initialization failed, entering degraded mode");
                let mut state = self.state.write().await;
                state.routes = Some(Arc::new(RouteManager::minimal()));
                state.initialized = true;
                state.degraded = true;
                Ok(())
            }
        }
    }

    /// Close the container and every provider, exactly once
    ///
    /// Idempotent and safe under concurrent callers: the first call
    /// performs the shutdown, the rest return `Ok` immediately.
    pub async fn close(&self) -> Result<()> {
        let manager = {
            let mut state = self.state.write().await;
            if state.closed {
                return Ok(());
            }
            state.closed = true;
            state.use_cases = None;
            state.routes = None;
            state.manager.take()
        };
        // Closed is terminal: a pending lazy factory must not build an
        // engine over providers that are being shut down.
        *self.engine_factory.lock().await = None;

        if let Some(manager) = manager {
            manager.close().await?;
        }
        info!("container closed");
        Ok(())
    }

    /// Current configuration snapshot
    pub async fn config(&self) -> AppConfig {
        self.state.read().await.config.clone()
    }

    /// Replace the configuration before initialization
    pub async fn set_config(&self, config: AppConfig) -> Result<()> {
        let mut state = self.state.write().await;
        if state.initialized {
            return Err(Error::AlreadyInitialized);
        }
        state.config = config;
        Ok(())
    }

    /// Whether initialization completed (possibly degraded)
    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.initialized
    }

    /// Whether the container came up degraded
    pub async fn is_degraded(&self) -> bool {
        self.state.read().await.degraded
    }

    /// Whether the container was closed
    pub async fn is_closed(&self) -> bool {
        self.state.read().await.closed
    }

    /// The provider manager, once initialized
    pub async fn manager(&self) -> Option<Arc<ProviderManager>> {
        self.state.read().await.manager.clone()
    }

    /// Active database provider
    pub async fn database(&self) -> Option<Arc<dyn DatabaseProvider>> {
        self.state.read().await.manager.as_ref().map(|m| m.database())
    }

    /// Active auth provider
    pub async fn auth(&self) -> Option<Arc<dyn AuthProvider>> {
        self.state.read().await.manager.as_ref().map(|m| m.auth())
    }

    /// Active storage provider
    pub async fn storage(&self) -> Option<Arc<dyn StorageProvider>> {
        self.state.read().await.manager.as_ref().map(|m| m.storage())
    }

    /// Active id provider
    pub async fn ids(&self) -> Option<Arc<dyn IdProvider>> {
        self.state.read().await.manager.as_ref().map(|m| m.ids())
    }

    /// Active payment provider, when initialized and configured
    pub async fn payment(&self) -> Option<Arc<dyn PaymentProvider>> {
        self.state.read().await.manager.as_ref().and_then(|m| m.payment())
    }

    /// Active email provider, when initialized and configured
    pub async fn email(&self) -> Option<Arc<dyn EmailProvider>> {
        self.state.read().await.manager.as_ref().and_then(|m| m.email())
    }

    /// The use-case aggregate, once initialized
    pub async fn use_cases(&self) -> Option<Arc<UseCases>> {
        self.state.read().await.use_cases.clone()
    }

    /// The compiled route table, once initialized
    pub async fn route_manager(&self) -> Option<Arc<RouteManager>> {
        self.state.read().await.routes.clone()
    }

    /// Latest provider health snapshot
    pub async fn health_snapshot(&self) -> HashMap<String, ProviderHealth> {
        let manager = self.state.read().await.manager.clone();
        match manager {
            Some(manager) => manager.health_snapshot().await,
            None => HashMap::new(),
        }
    }

    /// The workflow engine, if already built
    ///
    /// Under lazy binding this stays `None` until the first
    /// [`Container::workflow_engine_or_build`] call.
    pub fn workflow_engine(&self) -> Option<Arc<dyn WorkflowEngine>> {
        self.engine.get().cloned()
    }

    /// The workflow engine, building it on first access when a factory
    /// is pending
    ///
    /// Concurrent first callers race on a single-init cell: exactly one
    /// invokes the factory, everyone gets the same instance.
    pub async fn workflow_engine_or_build(&self) -> Result<Arc<dyn WorkflowEngine>> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let factory = self.engine_factory.lock().await;
                let Some(factory) = factory.as_ref() else {
                    return Err(Error::engine("no workflow engine factory bound"));
                };
                factory()
            })
            .await?;

        // The factory is spent once the engine exists.
        self.engine_factory.lock().await.take();
        Ok(Arc::clone(engine))
    }

    /// Bind an external engine factory
    ///
    /// Fails once an engine is already built or the container is closed;
    /// replaces any factory still pending.
    pub async fn set_workflow_engine_factory(&self, factory: EngineFactory) -> Result<()> {
        if self.engine.get().is_some() {
            return Err(Error::engine("workflow engine already built"));
        }
        let state = self.state.read().await;
        if state.closed {
            return Err(Error::config("container is closed"));
        }
        *self.engine_factory.lock().await = Some(factory);
        Ok(())
    }

    /// Whether a deferred engine factory is waiting for first access
    pub async fn engine_factory_pending(&self) -> bool {
        self.engine_factory.lock().await.is_some()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("engine_built", &self.engine.get().is_some())
            .finish_non_exhaustive()
    }
}
