//! Table/collection naming
//!
//! Repositories address their tables or collections through a
//! `CollectionNames` set. The active database provider may register its
//! own naming builder; when none is registered the hard-coded default
//! set below is used.

use serde::{Deserialize, Serialize};

/// Table/collection names used by the use-case repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
    /// Client records
    pub clients: String,
    /// Invoice records
    pub invoices: String,
    /// Subscription records
    pub subscriptions: String,
    /// Inventory records
    pub inventory: String,
    /// Payment records
    pub payments: String,
    /// Workflow template records
    pub workflows: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            clients: "clients".to_string(),
            invoices: "invoices".to_string(),
            subscriptions: "subscriptions".to_string(),
            inventory: "inventory".to_string(),
            payments: "payments".to_string(),
            workflows: "workflows".to_string(),
        }
    }
}

impl CollectionNames {
    /// Build a naming set with every collection prefixed
    ///
    /// Useful for backends that namespace tables per deployment
    /// (e.g. a shared cluster keyed by application prefix).
    pub fn with_prefix(prefix: &str) -> Self {
        let base = Self::default();
        Self {
            clients: format!("{prefix}{}", base.clients),
            invoices: format!("{prefix}{}", base.invoices),
            subscriptions: format!("{prefix}{}", base.subscriptions),
            inventory: format!("{prefix}{}", base.inventory),
            payments: format!("{prefix}{}", base.payments),
            workflows: format!("{prefix}{}", base.workflows),
        }
    }

    /// All collection names in declaration order
    pub fn all(&self) -> [&str; 6] {
        [
            &self.clients,
            &self.invoices,
            &self.subscriptions,
            &self.inventory,
            &self.payments,
            &self.workflows,
        ]
    }
}
