//! Route composition
//!
//! The composition runtime does not serve HTTP itself; it compiles a
//! route table that an outer transport can mount. The default composer
//! derives one CRUD route set per entity from the use-case aggregate.

use async_trait::async_trait;

use bizcore_domain::error::{Error, Result};

use crate::container::Container;

/// One mounted route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// HTTP method
    pub method: &'static str,
    /// Path pattern, `{id}` style placeholders
    pub path: String,
    /// Operation id, `<entity>.<operation>` or a well-known name
    pub operation: String,
}

impl RouteEntry {
    /// Create a route entry
    pub fn new(method: &'static str, path: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation: operation.into(),
        }
    }
}

/// Compiled route table
#[derive(Debug, Clone, Default)]
pub struct RouteManager {
    routes: Vec<RouteEntry>,
}

impl RouteManager {
    /// Create a route table from entries
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }

    /// Minimal table mounted when the container comes up degraded:
    /// health only
    pub fn minimal() -> Self {
        Self {
            routes: vec![RouteEntry::new("GET", "/health", "health")],
        }
    }

    /// All mounted routes
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of mounted routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find a route by method and exact path pattern
    pub fn find(&self, method: &str, path: &str) -> Option<&RouteEntry> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.path == path)
    }
}

/// Strategy producing the route table for an initialized container
///
/// Called by the container during initialization, after the use-case
/// aggregate exists and outside the container's state lock.
#[async_trait]
pub trait RouteComposer: Send + Sync {
    /// Compose the route table
    async fn compose(&self, container: &Container) -> Result<RouteManager>;
}

/// Default composer: health plus CRUD routes for every entity
#[derive(Debug, Clone, Copy, Default)]
pub struct CrudRouteComposer;

impl CrudRouteComposer {
    /// Create the default composer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RouteComposer for CrudRouteComposer {
    async fn compose(&self, container: &Container) -> Result<RouteManager> {
        let Some(use_cases) = container.use_cases().await else {
            return Err(Error::config("cannot compose routes before use cases exist"));
        };

        let mut routes = vec![RouteEntry::new("GET", "/health", "health")];
        for entity in use_cases.entities() {
            let base = format!("/api/{entity}");
            let item = format!("/api/{entity}/{{id}}");
            routes.push(RouteEntry::new("GET", base.clone(), format!("{entity}.list")));
            routes.push(RouteEntry::new("POST", base, format!("{entity}.create")));
            routes.push(RouteEntry::new("GET", item.clone(), format!("{entity}.get")));
            routes.push(RouteEntry::new("PUT", item.clone(), format!("{entity}.update")));
            routes.push(RouteEntry::new("DELETE", item, format!("{entity}.delete")));
        }

        Ok(RouteManager::new(routes))
    }
}
