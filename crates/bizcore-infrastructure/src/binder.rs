//! Workflow engine binder
//!
//! Decides, from the configured mode, whether the engine is built during
//! container initialization (eager/late) or deferred behind a factory to
//! the first access (lazy). The binder itself never stores state; the
//! container owns the built engine or the pending factory.

use std::sync::Arc;

use tracing::info;

use bizcore_application::executors::ExecutorRegistry;
use bizcore_application::use_cases::UseCases;
use bizcore_application::workflow::{EngineFactory, EngineMode, StepWorkflowEngine, WorkflowEngine};
use bizcore_domain::error::Result;

use crate::config::AppConfig;

/// Outcome of binding the workflow engine
pub enum EngineBinding {
    /// Engine built synchronously (eager and late modes)
    Built(Arc<dyn WorkflowEngine>),
    /// Factory captured for first-access construction (lazy mode)
    Deferred(EngineFactory),
}

impl std::fmt::Debug for EngineBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Built(engine) => f.debug_tuple("Built").field(&engine.name()).finish(),
            Self::Deferred(_) => f.debug_tuple("Deferred").finish(),
        }
    }
}

fn build_engine(use_cases: &Arc<UseCases>) -> Arc<dyn WorkflowEngine> {
    let executors = ExecutorRegistry::from_use_cases(use_cases);
    Arc::new(StepWorkflowEngine::new(
        use_cases.business_type().to_string(),
        executors,
    ))
}

/// Bind the workflow engine according to the configured mode
///
/// An unknown mode string is a hard error; the caller decides whether
/// that aborts initialization or merely leaves the engine unbound.
pub fn bind_workflow_engine(
    config: &AppConfig,
    use_cases: Arc<UseCases>,
) -> Result<EngineBinding> {
    let mode = EngineMode::parse(config.workflow_engine_mode())?;
    info!(%mode, "binding workflow engine");

    if mode.is_lazy() {
        let factory: EngineFactory = Box::new(move || Ok(build_engine(&use_cases)));
        Ok(EngineBinding::Deferred(factory))
    } else {
        Ok(EngineBinding::Built(build_engine(&use_cases)))
    }
}
