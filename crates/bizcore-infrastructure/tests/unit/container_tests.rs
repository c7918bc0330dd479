//! Container lifecycle tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use bizcore_application::workflow::{EngineFactory, WorkflowEngine};
use bizcore_domain::error::{Error, Result};
use bizcore_infrastructure::config::AppConfig;
use bizcore_infrastructure::container::Container;
use bizcore_infrastructure::bootstrap::build_registry;
use bizcore_infrastructure::routing::{RouteComposer, RouteManager};

use crate::support::{PROBE_DB, Probe, registry_with_probe};

fn container(config: AppConfig) -> Container {
    Container::new(build_registry(), config)
}

#[tokio::test]
async fn default_initialization_brings_up_the_full_stack() {
    let container = container(AppConfig::default());
    container.initialize().await.unwrap();

    assert!(container.is_initialized().await);
    assert!(!container.is_degraded().await);
    assert_eq!(container.database().await.unwrap().name(), "mock_db");
    assert_eq!(container.auth().await.unwrap().name(), "mock_auth");
    assert_eq!(container.storage().await.unwrap().name(), "noop");
    assert_eq!(container.ids().await.unwrap().name(), "uuid");

    let use_cases = container.use_cases().await.unwrap();
    assert_eq!(use_cases.business_type(), "default");

    // health route plus five CRUD routes per entity
    let routes = container.route_manager().await.unwrap();
    assert_eq!(routes.len(), 1 + 5 * 5);
    assert!(routes.find("POST", "/api/clients").is_some());

    // eager mode built the engine during initialization
    let engine = container.workflow_engine().unwrap();
    assert_eq!(engine.name(), "step-engine");
    assert!(!container.engine_factory_pending().await);

    container.close().await.unwrap();
}

#[tokio::test]
async fn configured_integrations_are_exposed() {
    let config = AppConfig {
        payment_provider: "mock_pay".to_string(),
        email_provider: "log".to_string(),
        ..AppConfig::default()
    };
    let container = container(config);
    container.initialize().await.unwrap();

    assert!(container.payment().await.is_some());
    assert!(container.email().await.is_some());

    // the aggregate can now charge invoices
    let use_cases = container.use_cases().await.unwrap();
    let invoice = use_cases
        .service("invoices")
        .unwrap()
        .create(json!({"amount_cents": 900, "client_id": "c-9"}))
        .await
        .unwrap();
    let receipt = use_cases
        .charge_invoice(invoice["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(receipt.amount_cents, 900);

    container.close().await.unwrap();
}

#[tokio::test]
async fn initialization_is_not_reentrant() {
    let container = container(AppConfig::default());
    container.initialize().await.unwrap();

    let err = container.initialize().await.unwrap_err();
    assert_eq!(err.to_string(), "already initialized");

    // the degrading wrapper still refuses reentry
    let err = container.initialize_or_degrade().await.unwrap_err();
    assert_eq!(err.to_string(), "already initialized");

    container.close().await.unwrap();
}

#[tokio::test]
async fn core_failure_degrades_instead_of_aborting() {
    let config = AppConfig {
        database_provider: "dynamo".to_string(),
        ..AppConfig::default()
    };
    let container = container(config.clone());

    let err = container.initialize().await.unwrap_err();
    assert!(err.to_string().contains("no factory for database:dynamo"));

    let container = Container::new(build_registry(), config);
    container.initialize_or_degrade().await.unwrap();
    assert!(container.is_initialized().await);
    assert!(container.is_degraded().await);
    assert!(container.use_cases().await.is_none());

    // degraded mode mounts the health route only
    let routes = container.route_manager().await.unwrap();
    assert_eq!(routes.len(), 1);
    assert!(routes.find("GET", "/health").is_some());

    container.close().await.unwrap();
}

#[tokio::test]
async fn degraded_startup_tears_down_partial_state() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: PROBE_DB.to_string(),
        // auth failure hits after the database already came up
        auth_provider: "no_such_auth".to_string(),
        ..AppConfig::default()
    };

    let container = Container::new(registry, config);
    container.initialize_or_degrade().await.unwrap();
    assert!(container.is_degraded().await);
    // the database built in phase 1 was closed during teardown
    assert_eq!(probe.close_calls(), probe.init_calls());

    container.close().await.unwrap();
}

struct BrokenComposer;

#[async_trait]
impl RouteComposer for BrokenComposer {
    async fn compose(&self, _container: &Container) -> Result<RouteManager> {
        Err(Error::config("route composition unavailable"))
    }
}

#[tokio::test]
async fn failed_initialization_releases_its_providers_before_retry() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: PROBE_DB.to_string(),
        ..AppConfig::default()
    };
    let container = Container::new(registry, config);

    // route composition fails after every provider already came up
    let err = container
        .initialize_with(&BrokenComposer)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("route composition unavailable"));
    assert!(!container.is_initialized().await);
    assert!(container.manager().await.is_none());
    assert!(container.workflow_engine().is_none());
    assert_eq!(probe.close_calls(), probe.init_calls());

    // a retry starts from a clean slate instead of orphaning the first
    // provider set
    container.initialize().await.unwrap();
    assert!(container.workflow_engine().is_some());
    container.close().await.unwrap();
    assert_eq!(probe.close_calls(), probe.init_calls());
}

#[tokio::test]
async fn bogus_engine_mode_leaves_the_engine_unbound() {
    let config = AppConfig {
        workflow_engine_mode: "bogus".to_string(),
        ..AppConfig::default()
    };
    let container = container(config);
    container.initialize().await.unwrap();

    assert!(container.is_initialized().await);
    assert!(!container.is_degraded().await);
    assert!(container.workflow_engine().is_none());
    assert!(!container.engine_factory_pending().await);

    let err = container.workflow_engine_or_build().await.err().unwrap();
    assert!(err.to_string().contains("no workflow engine factory bound"));

    container.close().await.unwrap();
}

#[tokio::test]
async fn lazy_mode_builds_on_first_access_only() {
    let config = AppConfig {
        workflow_engine_mode: "lazy".to_string(),
        ..AppConfig::default()
    };
    let container = container(config);
    container.initialize().await.unwrap();

    assert!(container.workflow_engine().is_none());
    assert!(container.engine_factory_pending().await);

    let first = container.workflow_engine_or_build().await.unwrap();
    assert_eq!(first.name(), "step-engine");
    assert!(!container.engine_factory_pending().await);

    let second = container.workflow_engine_or_build().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(container.workflow_engine().is_some());

    container.close().await.unwrap();
}

#[tokio::test]
async fn pending_lazy_factory_does_not_survive_close() {
    let config = AppConfig {
        workflow_engine_mode: "lazy".to_string(),
        ..AppConfig::default()
    };
    let container = container(config);
    container.initialize().await.unwrap();
    assert!(container.engine_factory_pending().await);

    container.close().await.unwrap();

    // closed is terminal: no engine may be built over closed providers
    assert!(!container.engine_factory_pending().await);
    let err = container.workflow_engine_or_build().await.err().unwrap();
    assert!(err.to_string().contains("no workflow engine factory bound"));

    let factory: EngineFactory =
        Box::new(|| Ok(Arc::new(NullEngine) as Arc<dyn WorkflowEngine>));
    let err = container.set_workflow_engine_factory(factory).await.unwrap_err();
    assert!(err.to_string().contains("container is closed"));
}

struct NullEngine;

#[async_trait]
impl WorkflowEngine for NullEngine {
    fn name(&self) -> &str {
        "null-engine"
    }

    fn step_ids(&self) -> Vec<String> {
        Vec::new()
    }

    async fn run_step(&self, step_id: &str, _input: Value) -> Result<Value> {
        Err(Error::engine(format!("unknown workflow step {step_id}")))
    }
}

#[tokio::test]
async fn concurrent_lazy_access_invokes_the_factory_once() {
    let container = Arc::new(container(AppConfig::default()));
    let builds = Arc::new(AtomicUsize::new(0));

    let factory: EngineFactory = {
        let builds = Arc::clone(&builds);
        Box::new(move || {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NullEngine) as Arc<dyn WorkflowEngine>)
        })
    };
    container.set_workflow_engine_factory(factory).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let container = Arc::clone(&container);
        handles.push(tokio::spawn(async move {
            container.workflow_engine_or_build().await.unwrap()
        }));
    }
    for handle in handles {
        let engine = handle.await.unwrap();
        assert_eq!(engine.name(), "null-engine");
    }

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn factory_rebinding_fails_once_the_engine_exists() {
    let container = container(AppConfig::default());
    container.initialize().await.unwrap();

    let factory: EngineFactory =
        Box::new(|| Ok(Arc::new(NullEngine) as Arc<dyn WorkflowEngine>));
    let err = container.set_workflow_engine_factory(factory).await.unwrap_err();
    assert!(err.to_string().contains("workflow engine already built"));

    container.close().await.unwrap();
}

#[tokio::test]
async fn close_is_idempotent_and_final() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: PROBE_DB.to_string(),
        ..AppConfig::default()
    };

    let container = Container::new(registry, config);
    container.initialize().await.unwrap();

    container.close().await.unwrap();
    container.close().await.unwrap();
    assert_eq!(probe.close_calls(), 1);
    assert!(container.is_closed().await);
    assert!(container.use_cases().await.is_none());
    assert!(container.route_manager().await.is_none());

    let err = container.initialize().await.unwrap_err();
    assert!(err.to_string().contains("container is closed"));
}

#[tokio::test]
async fn concurrent_close_calls_still_close_once() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: PROBE_DB.to_string(),
        ..AppConfig::default()
    };

    let container = Arc::new(Container::new(registry, config));
    container.initialize().await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let container = Arc::clone(&container);
        handles.push(tokio::spawn(async move { container.close().await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(probe.close_calls(), 1);
}

#[tokio::test]
async fn config_is_frozen_after_initialization() {
    let container = container(AppConfig::default());
    container
        .set_config(AppConfig {
            business_type: "retail".to_string(),
            ..AppConfig::default()
        })
        .await
        .unwrap();
    container.initialize().await.unwrap();

    assert_eq!(container.config().await.business_type(), "retail");
    let err = container.set_config(AppConfig::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "already initialized");

    container.close().await.unwrap();
}

#[tokio::test]
async fn health_snapshot_fills_after_startup() {
    let config = AppConfig {
        health_interval_secs: 1,
        ..AppConfig::default()
    };
    let container = container(config);
    container.initialize().await.unwrap();

    // the loop's first tick fires immediately
    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = container.health_snapshot().await;
    assert!(snapshot.contains_key("database:mock_db"));
    assert!(snapshot.values().all(|h| h.status.is_healthy()));

    container.close().await.unwrap();
}

#[tokio::test]
async fn workflow_steps_dispatch_through_the_container_engine() {
    let container = container(AppConfig::default());
    container.initialize().await.unwrap();

    let engine = container.workflow_engine().unwrap();
    let created = engine
        .run_step("clients.create", json!({"name": "Acme"}))
        .await
        .unwrap();
    assert!(created["id"].is_string());

    let err = engine.run_step("clients.reap", json!({})).await.unwrap_err();
    assert!(err.to_string().contains("unknown workflow step"));

    container.close().await.unwrap();
}
