//! Workflow engine binding contract
//!
//! The engine's own dispatch and state-transition logic is an external
//! collaborator; this module specifies only what the composition runtime
//! needs: the binding mode, the engine trait, and a thin step engine
//! dispatching through the [`ExecutorRegistry`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use bizcore_domain::error::{Error, Result};

use crate::executors::ExecutorRegistry;

/// Timing policy controlling when the workflow engine is constructed
/// relative to container readiness
///
/// `eager` and `late` are behaviorally identical: the engine is built
/// synchronously during container initialization. `lazy` defers
/// construction to the first access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Construct during initialization (default)
    #[default]
    Eager,
    /// Alias of eager, kept for configuration compatibility
    Late,
    /// Defer construction to the first access, build-once
    Lazy,
}

impl EngineMode {
    /// Parse a mode string, case-insensitively
    ///
    /// Any string other than eager/late/lazy is a configuration error.
    pub fn parse(mode: &str) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(Self::Eager),
            "late" => Ok(Self::Late),
            "lazy" => Ok(Self::Lazy),
            _ => Err(Error::UnknownEngineMode {
                mode: mode.to_string(),
            }),
        }
    }

    /// Whether construction is deferred to first access
    pub fn is_lazy(self) -> bool {
        matches!(self, Self::Lazy)
    }
}

impl std::str::FromStr for EngineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Eager => "eager",
            Self::Late => "late",
            Self::Lazy => "lazy",
        };
        f.write_str(name)
    }
}

/// Orchestration engine contract
///
/// Once a container holds a non-nil engine it is never rebuilt.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Engine implementation name
    fn name(&self) -> &str;

    /// Step identifiers the engine can dispatch
    fn step_ids(&self) -> Vec<String>;

    /// Execute one workflow step
    async fn run_step(&self, step_id: &str, input: Value) -> Result<Value>;
}

/// Default engine: dispatches steps straight through the executor
/// registry
pub struct StepWorkflowEngine {
    business_type: String,
    executors: ExecutorRegistry,
}

impl StepWorkflowEngine {
    /// Create an engine over a compiled executor registry
    pub fn new(business_type: String, executors: ExecutorRegistry) -> Self {
        Self {
            business_type,
            executors,
        }
    }

    /// Business type the engine was built for
    pub fn business_type(&self) -> &str {
        &self.business_type
    }
}

#[async_trait]
impl WorkflowEngine for StepWorkflowEngine {
    fn name(&self) -> &str {
        "step-engine"
    }

    fn step_ids(&self) -> Vec<String> {
        self.executors.step_ids().iter().map(|s| s.to_string()).collect()
    }

    async fn run_step(&self, step_id: &str, input: Value) -> Result<Value> {
        let Some(executor) = self.executors.get(step_id) else {
            return Err(Error::engine(format!("unknown workflow step {step_id}")));
        };
        debug!(step = step_id, "dispatching workflow step");
        executor(input).await
    }
}

impl std::fmt::Debug for StepWorkflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepWorkflowEngine")
            .field("business_type", &self.business_type)
            .field("steps", &self.executors.len())
            .finish()
    }
}

/// Engine factory captured for lazy binding
///
/// A deferred zero-argument closure carrying its build dependencies;
/// logically consumed once invoked successfully.
pub type EngineFactory = Box<dyn Fn() -> Result<Arc<dyn WorkflowEngine>> + Send + Sync>;
