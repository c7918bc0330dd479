//! Shared test fixtures: a counting database probe and registries built
//! around it

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{DatabaseProvider, Provider, ProviderConfig};
use bizcore_providers::register_builtin_providers;

/// Registry name of the probe database provider
pub const PROBE_DB: &str = "probe_db";

/// Shared observation point for one probe provider instance
#[derive(Debug, Default)]
pub struct Probe {
    init_calls: AtomicUsize,
    health_calls: AtomicUsize,
    close_calls: AtomicUsize,
    fail_init: AtomicBool,
    fail_health: AtomicBool,
    fail_close: AtomicBool,
}

impl Probe {
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn fail_init(&self) {
        self.fail_init.store(true, Ordering::SeqCst);
    }

    pub fn fail_health(&self) {
        self.fail_health.store(true, Ordering::SeqCst);
    }

    pub fn fail_close(&self) {
        self.fail_close.store(true, Ordering::SeqCst);
    }
}

/// Database provider that counts lifecycle calls and fails on demand
pub struct ProbeDatabaseProvider {
    probe: Arc<Probe>,
}

#[async_trait]
impl Provider for ProbeDatabaseProvider {
    fn name(&self) -> &str {
        PROBE_DB
    }

    async fn initialize(&self, _config: &ProviderConfig) -> Result<()> {
        self.probe.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.probe.fail_init.load(Ordering::SeqCst) {
            return Err(Error::database("probe init failure"));
        }
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        self.probe.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.probe.fail_health.load(Ordering::SeqCst) {
            return Err(Error::database("probe health failure"));
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.probe.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.probe.fail_close.load(Ordering::SeqCst) {
            return Err(Error::database("probe close failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl DatabaseProvider for ProbeDatabaseProvider {
    async fn put_document(&self, _collection: &str, _id: &str, _document: Value) -> Result<()> {
        Ok(())
    }

    async fn get_document(&self, _collection: &str, _id: &str) -> Result<Option<Value>> {
        Ok(None)
    }

    async fn delete_document(&self, _collection: &str, _id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn list_documents(&self, _collection: &str) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

/// Builtins plus the probe database provider observing `probe`
pub fn registry_with_probe(probe: &Arc<Probe>) -> Arc<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    register_builtin_providers(&mut registry);

    let probe = Arc::clone(probe);
    registry.database.register(ProviderEntry::new(
        PROBE_DB,
        "Counting database probe",
        move |_config| {
            let provider: Arc<dyn DatabaseProvider> = Arc::new(ProbeDatabaseProvider {
                probe: Arc::clone(&probe),
            });
            Ok(provider)
        },
    ));
    Arc::new(registry)
}
