//! In-memory scheduler provider
//!
//! Tracks job registrations without executing anything.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{Provider, ProviderConfig, ScheduledJob, SchedulerProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "memory";

/// Scheduler provider backed by an in-memory job table
#[derive(Debug, Default)]
pub struct MemorySchedulerProvider {
    jobs: DashMap<String, ScheduledJob>,
}

impl MemorySchedulerProvider {
    /// Create a provider with no jobs
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled jobs
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

#[async_trait]
impl Provider for MemorySchedulerProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn initialize(&self, _config: &ProviderConfig) -> Result<()> {
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.jobs.clear();
        Ok(())
    }
}

#[async_trait]
impl SchedulerProvider for MemorySchedulerProvider {
    async fn schedule(&self, job: &ScheduledJob) -> Result<String> {
        if job.cron.is_empty() {
            return Err(Error::invalid_argument("cron expression must not be empty"));
        }
        let job_id = Uuid::new_v4().to_string();
        self.jobs.insert(job_id.clone(), job.clone());
        Ok(job_id)
    }

    async fn cancel(&self, job_id: &str) -> Result<bool> {
        Ok(self.jobs.remove(job_id).is_some())
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.scheduler.register(ProviderEntry::new(
        PROVIDER_NAME,
        "In-memory scheduler tracking job registrations",
        |_config| {
            let provider: Arc<dyn SchedulerProvider> = Arc::new(MemorySchedulerProvider::new());
            Ok(provider)
        },
    ));
}
