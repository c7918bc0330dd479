//! Executor Registry
//!
//! Lookup table mapping workflow-step identifiers to use-case
//! invocations. Built once from the complete use-case aggregate and
//! treated as read-only thereafter; the workflow engine consumes it for
//! dispatch.
//!
//! Step identifiers follow `<entity>.<operation>`, e.g. `clients.create`
//! or `invoices.get`.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use bizcore_domain::error::{Error, Result};

use crate::use_cases::UseCases;

/// Operations registered per entity
pub const OPERATIONS: [&str; 5] = ["create", "get", "update", "delete", "list"];

/// A single registered step executor
pub type Executor = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Read-only step-id to executor lookup table
pub struct ExecutorRegistry {
    executors: HashMap<String, Executor>,
}

impl ExecutorRegistry {
    /// Build the registry from the compiled use-case aggregate
    pub fn from_use_cases(use_cases: &Arc<UseCases>) -> Self {
        let mut executors = HashMap::new();
        for entity in use_cases.entities() {
            for operation in OPERATIONS {
                let step_id = format!("{entity}.{operation}");
                executors.insert(step_id, make_executor(Arc::clone(use_cases), entity, operation));
            }
        }
        Self { executors }
    }

    /// Look up the executor for a step identifier
    pub fn get(&self, step_id: &str) -> Option<Executor> {
        self.executors.get(step_id).cloned()
    }

    /// All registered step identifiers, sorted
    pub fn step_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.executors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered steps
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

impl std::fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("steps", &self.executors.len())
            .finish()
    }
}

fn required_id(input: &Value) -> Result<String> {
    input
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .ok_or_else(|| Error::invalid_argument("step input requires an id field"))
}

fn make_executor(use_cases: Arc<UseCases>, entity: &'static str, operation: &'static str) -> Executor {
    Arc::new(move |input: Value| {
        let use_cases = Arc::clone(&use_cases);
        async move {
            let Some(service) = use_cases.service(entity) else {
                return Err(Error::not_found(format!("entity {entity}")));
            };
            match operation {
                "create" => service.create(input).await,
                "get" => service.get(&required_id(&input)?).await,
                "update" => {
                    let id = required_id(&input)?;
                    service.update(&id, input).await
                }
                "delete" => {
                    let id = required_id(&input)?;
                    service.delete(&id).await?;
                    Ok(json!({ "deleted": id }))
                }
                "list" => service.list().await.map(Value::Array),
                other => Err(Error::engine(format!("unknown operation {other}"))),
            }
        }
        .boxed()
    })
}
