//! Configuration loading tests

use bizcore_infrastructure::config::{AppConfig, ConfigLoader};

#[test]
fn defaults_without_environment() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.database_provider(), "mock_db");
        assert_eq!(config.auth_provider(), "mock_auth");
        assert_eq!(config.storage_provider(), "noop");
        assert_eq!(config.id_provider(), "uuid");
        assert_eq!(config.email_provider(), None);
        assert_eq!(config.payment_provider(), None);
        assert_eq!(config.scheduler_provider(), None);
        assert_eq!(config.tabular_provider(), None);
        assert_eq!(config.translation_provider(), Some("noop"));
        assert_eq!(config.workflow_engine_mode(), "eager");
        assert_eq!(config.business_type(), "default");
        assert_eq!(config.health_interval_secs, 300);
        assert_eq!(config.health_timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn config_env_keys_are_honored() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("CONFIG_DATABASE_PROVIDER", "probe_db");
        jail.set_env("CONFIG_AUTH_PROVIDER", "mock_auth");
        jail.set_env("CONFIG_PAYMENT_PROVIDER", "mock_pay");
        jail.set_env("CONFIG_WORKFLOW_ENGINE_MODE", "lazy");
        jail.set_env("CONFIG_HEALTH_INTERVAL_SECS", "5");
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.database_provider(), "probe_db");
        assert_eq!(config.payment_provider(), Some("mock_pay"));
        assert_eq!(config.workflow_engine_mode(), "lazy");
        assert_eq!(config.health_interval_secs, 5);
        Ok(())
    });
}

#[test]
fn business_type_comes_from_its_own_key() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("BUSINESS_TYPE", "retail");
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.business_type(), "retail");
        Ok(())
    });
}

#[test]
fn empty_env_values_mean_unset() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("CONFIG_DATABASE_PROVIDER", "");
        jail.set_env("CONFIG_TRANSLATION_PROVIDER", "");
        jail.set_env("BUSINESS_TYPE", "");
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.database_provider(), "mock_db");
        assert_eq!(config.translation_provider(), Some("noop"));
        assert_eq!(config.business_type(), "default");
        Ok(())
    });
}

#[test]
fn durations_never_collapse_to_zero() {
    let config = AppConfig {
        health_interval_secs: 0,
        health_timeout_secs: 0,
        ..AppConfig::default()
    };
    assert_eq!(config.health_interval().as_secs(), 1);
    assert_eq!(config.health_timeout().as_secs(), 1);
}
