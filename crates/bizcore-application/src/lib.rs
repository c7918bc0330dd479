//! Application layer for bizcore
//!
//! Orchestration-facing building blocks that sit between the domain
//! contracts and the composition runtime:
//!
//! - [`registry`] - the explicit provider registry populated once at the
//!   composition root
//! - [`use_cases`] - the use-case aggregate consumed by routing and the
//!   workflow engine
//! - [`executors`] - the read-only step-id to use-case lookup table
//! - [`workflow`] - the workflow engine binding contract and modes

pub mod executors;
pub mod registry;
pub mod use_cases;
pub mod workflow;

pub use executors::ExecutorRegistry;
pub use registry::{CategoryRegistry, ProviderEntry, ProviderRegistry};
pub use use_cases::{UseCaseDeps, UseCases};
pub use workflow::{EngineFactory, EngineMode, StepWorkflowEngine, WorkflowEngine};
