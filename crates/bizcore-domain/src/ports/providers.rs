//! Provider lifecycle and category contracts
//!
//! Every backend (database, auth, storage, email, payment, scheduler,
//! tabular, translation, id) implements the same [`Provider`] lifecycle:
//! `name` / `initialize` / `health` / `close`. Category traits extend it
//! with the minimal surface the use-case layer consumes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Configuration handed to a provider factory and to the instance's own
/// `initialize` call
///
/// Contains the selected provider name plus free-form settings. Providers
/// use what they need and ignore the rest; unknown keys are not an error.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Selected provider name (e.g. "mock_db", "noop")
    pub provider: String,
    /// Business type of the running deployment
    pub business_type: String,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl ProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the business type
    pub fn with_business_type(mut self, business_type: impl Into<String>) -> Self {
        self.business_type = business_type.into();
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra configuration value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// Uniform lifecycle contract implemented by every pluggable backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Canonical provider name
    fn name(&self) -> &str;

    /// Self-configure from the given config
    ///
    /// Called exactly once by the registry after construction, before the
    /// instance is handed to anyone else.
    async fn initialize(&self, config: &ProviderConfig) -> Result<()>;

    /// Liveness probe; an `Err` marks the provider unhealthy
    async fn health(&self) -> Result<()>;

    /// Release connections and background resources
    async fn close(&self) -> Result<()>;
}

/// Document database backend
#[async_trait]
pub trait DatabaseProvider: Provider {
    /// Store (or replace) a document under (collection, id)
    async fn put_document(&self, collection: &str, id: &str, document: Value) -> Result<()>;

    /// Fetch a document, `None` when absent
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Delete a document; returns whether it existed
    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool>;

    /// List every document in a collection, ordered by id
    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>>;
}

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable subject identifier
    pub subject: String,
    /// Tenant the caller belongs to
    pub tenant: String,
    /// Granted roles
    pub roles: Vec<String>,
}

/// Authentication backend
#[async_trait]
pub trait AuthProvider: Provider {
    /// Verify a bearer token and resolve the caller identity
    async fn verify_token(&self, token: &str) -> Result<Principal>;
}

/// Blob storage backend
#[async_trait]
pub trait StorageProvider: Provider {
    /// Store an object under a key
    async fn put_object(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Fetch an object, `None` when absent
    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete an object; returns whether it existed
    async fn delete_object(&self, key: &str) -> Result<bool>;
}

/// Identifier generation backend
pub trait IdProvider: Provider {
    /// Generate a new unique identifier
    fn new_id(&self) -> String;
}

/// Outbound email message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Email backend
#[async_trait]
pub trait EmailProvider: Provider {
    /// Send a message
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Charge request handed to the payment backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Amount in the smallest currency unit
    pub amount_cents: i64,
    /// ISO currency code
    pub currency: String,
    /// Customer identifier
    pub customer: String,
}

/// Receipt returned for a successful charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    /// Backend-assigned charge identifier
    pub charge_id: String,
    /// Charged amount in the smallest currency unit
    pub amount_cents: i64,
    /// ISO currency code
    pub currency: String,
    /// Charge timestamp
    pub created_at: DateTime<Utc>,
}

/// Payment backend
#[async_trait]
pub trait PaymentProvider: Provider {
    /// Charge a customer
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt>;

    /// Refund a previous charge
    async fn refund(&self, charge_id: &str) -> Result<()>;
}

/// Job definition for the scheduler backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    /// Human-readable job name
    pub name: String,
    /// Cron expression
    pub cron: String,
    /// Opaque payload delivered on each run
    pub payload: Value,
}

/// Scheduler backend
#[async_trait]
pub trait SchedulerProvider: Provider {
    /// Schedule a job; returns the job identifier
    async fn schedule(&self, job: &ScheduledJob) -> Result<String>;

    /// Cancel a job; returns whether it existed
    async fn cancel(&self, job_id: &str) -> Result<bool>;
}

/// Tabular (spreadsheet-like) export backend
#[async_trait]
pub trait TabularProvider: Provider {
    /// Append a row to a sheet
    async fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<()>;

    /// Read every row of a sheet
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>>;
}

/// Translation backend
#[async_trait]
pub trait TranslationProvider: Provider {
    /// Translate text into the target language
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}
