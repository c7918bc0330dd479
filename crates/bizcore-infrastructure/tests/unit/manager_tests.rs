//! Provider manager tests

use std::sync::Arc;
use std::time::Duration;

use bizcore_infrastructure::config::AppConfig;
use bizcore_infrastructure::manager::ProviderManager;

use crate::support::{PROBE_DB, Probe, registry_with_probe};

fn probe_config() -> AppConfig {
    AppConfig {
        database_provider: PROBE_DB.to_string(),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn build_core_resolves_the_configured_providers() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);

    let manager = ProviderManager::build_core(&registry, &probe_config())
        .await
        .unwrap();

    assert_eq!(manager.database().name(), PROBE_DB);
    assert_eq!(manager.auth().name(), "mock_auth");
    assert_eq!(manager.storage().name(), "noop");
    assert_eq!(manager.ids().name(), "uuid");
    assert_eq!(probe.init_calls(), 1);
    // probe_db registered no naming builder, so the defaults apply
    assert_eq!(manager.collection_names().clients, "clients");
}

#[tokio::test]
async fn build_core_fails_fast_on_unknown_provider() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: "dynamo".to_string(),
        ..AppConfig::default()
    };

    let err = ProviderManager::build_core(&registry, &config).await.unwrap_err();
    assert!(err.to_string().contains("no factory for database:dynamo"));
}

#[tokio::test]
async fn build_core_fails_fast_on_init_failure() {
    let probe = Arc::new(Probe::default());
    probe.fail_init();
    let registry = registry_with_probe(&probe);

    let err = ProviderManager::build_core(&registry, &probe_config())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("database provider startup failed"));
    assert_eq!(probe.init_calls(), 1);
}

#[tokio::test]
async fn integrations_are_best_effort() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);
    let config = AppConfig {
        database_provider: PROBE_DB.to_string(),
        email_provider: "log".to_string(),
        payment_provider: "no_such_gateway".to_string(),
        ..AppConfig::default()
    };

    let mut manager = ProviderManager::build_core(&registry, &config).await.unwrap();
    manager.build_integrations(&registry, &config).await;

    assert!(manager.email().is_some());
    assert!(manager.payment().is_none());
    assert!(manager.scheduler().is_none());
    // translation defaults to noop even when unconfigured
    assert!(manager.translation().is_some());
}

#[tokio::test]
async fn close_runs_exactly_once() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);

    let manager = ProviderManager::build_core(&registry, &probe_config())
        .await
        .unwrap();

    manager.close().await.unwrap();
    manager.close().await.unwrap();
    assert_eq!(probe.close_calls(), 1);
    assert!(manager.is_closed());
}

#[tokio::test]
async fn close_collects_failures_without_short_circuiting() {
    let probe = Arc::new(Probe::default());
    probe.fail_close();
    let registry = registry_with_probe(&probe);

    let manager = ProviderManager::build_core(&registry, &probe_config())
        .await
        .unwrap();

    let err = manager.close().await.unwrap_err();
    assert!(err.to_string().contains("database provider probe_db close failed"));
    assert_eq!(probe.close_calls(), 1);
    // a second close stays a no-op even after a failed first one
    manager.close().await.unwrap();
    assert_eq!(probe.close_calls(), 1);
}

#[tokio::test]
async fn health_checks_record_pass_and_fail() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);

    let manager = ProviderManager::build_core(&registry, &probe_config())
        .await
        .unwrap();

    manager.run_health_checks(Duration::from_secs(5)).await;
    let snapshot = manager.health_snapshot().await;
    let db = snapshot.get("database:probe_db").unwrap();
    assert!(db.status.is_healthy());

    probe.fail_health();
    manager.run_health_checks(Duration::from_secs(5)).await;
    let snapshot = manager.health_snapshot().await;
    let db = snapshot.get("database:probe_db").unwrap();
    assert!(!db.status.is_healthy());
    assert!(db.message.as_deref().unwrap().contains("probe health failure"));
}

#[tokio::test]
async fn health_loop_runs_and_stops_with_close() {
    let probe = Arc::new(Probe::default());
    let registry = registry_with_probe(&probe);

    let manager = Arc::new(
        ProviderManager::build_core(&registry, &probe_config())
            .await
            .unwrap(),
    );
    manager.spawn_health_loop(Duration::from_millis(10), Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(probe.health_calls() > 0);

    manager.close().await.unwrap();
    let after_close = probe.health_calls();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(probe.health_calls(), after_close);
}
