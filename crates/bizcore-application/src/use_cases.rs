//! Use-case aggregate
//!
//! A thin but real business layer: collection-scoped CRUD services over
//! the database provider, plus handles to the auth and integration
//! providers. The composition runtime builds exactly one aggregate per
//! container; routing and the workflow engine bind against it.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::debug;

use bizcore_domain::error::{Error, Result};
use bizcore_domain::naming::CollectionNames;
use bizcore_domain::ports::providers::{
    AuthProvider, ChargeReceipt, ChargeRequest, DatabaseProvider, EmailProvider, IdProvider,
    PaymentProvider, Principal,
};

/// Entities served by the aggregate, in declaration order
pub const ENTITIES: [&str; 5] = ["clients", "invoices", "subscriptions", "inventory", "payments"];

/// Collection-scoped CRUD service
///
/// Implements the repetitive use-case shape: validate the payload,
/// enrich timestamps, call the repository, translate the error.
pub struct RecordService {
    entity: &'static str,
    collection: String,
    database: Arc<dyn DatabaseProvider>,
    ids: Arc<dyn IdProvider>,
}

impl RecordService {
    /// Create a service bound to one collection
    pub fn new(
        entity: &'static str,
        collection: String,
        database: Arc<dyn DatabaseProvider>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            entity,
            collection,
            database,
            ids,
        }
    }

    /// Entity name served by this service
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Collection this service reads and writes
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn validate(&self, payload: &Value) -> Result<()> {
        let Some(object) = payload.as_object() else {
            return Err(Error::invalid_argument(format!(
                "{} payload must be a JSON object",
                self.entity
            )));
        };
        if object.is_empty() {
            return Err(Error::invalid_argument(format!(
                "{} payload must not be empty",
                self.entity
            )));
        }
        Ok(())
    }

    /// Create a record, assigning an id and creation timestamps
    pub async fn create(&self, payload: Value) -> Result<Value> {
        self.validate(&payload)?;
        let mut record = payload;
        let Some(object) = record.as_object_mut() else {
            // validate() already rejected non-objects
            return Err(Error::invalid_argument(format!(
                "{} payload must be a JSON object",
                self.entity
            )));
        };

        let id = match object.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.ids.new_id(),
        };
        let now = Utc::now().to_rfc3339();
        object.insert("id".to_string(), Value::String(id.clone()));
        object.insert("created_at".to_string(), Value::String(now.clone()));
        object.insert("updated_at".to_string(), Value::String(now));

        self.database
            .put_document(&self.collection, &id, record.clone())
            .await?;
        debug!(entity = self.entity, id = %id, "record created");
        Ok(record)
    }

    /// Fetch a record by id
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.database
            .get_document(&self.collection, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("{} {id}", self.entity)))
    }

    /// Merge a patch into an existing record, bumping `updated_at`
    pub async fn update(&self, id: &str, patch: Value) -> Result<Value> {
        self.validate(&patch)?;
        let mut record = self.get(id).await?;

        if let (Some(target), Some(changes)) = (record.as_object_mut(), patch.as_object()) {
            for (key, value) in changes {
                if key == "id" || key == "created_at" {
                    continue;
                }
                target.insert(key.clone(), value.clone());
            }
            target.insert(
                "updated_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }

        self.database
            .put_document(&self.collection, id, record.clone())
            .await?;
        debug!(entity = self.entity, id = %id, "record updated");
        Ok(record)
    }

    /// Delete a record by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.database.delete_document(&self.collection, id).await? {
            debug!(entity = self.entity, id = %id, "record deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("{} {id}", self.entity)))
        }
    }

    /// List every record in the collection
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.database.list_documents(&self.collection).await
    }
}

/// Dependencies needed to assemble the aggregate
pub struct UseCaseDeps {
    /// Business type of the running deployment
    pub business_type: String,
    /// Resolved table/collection naming set
    pub names: CollectionNames,
    /// Database backend (required)
    pub database: Arc<dyn DatabaseProvider>,
    /// Auth backend (required)
    pub auth: Arc<dyn AuthProvider>,
    /// Id backend (required)
    pub ids: Arc<dyn IdProvider>,
    /// Email backend, when configured
    pub email: Option<Arc<dyn EmailProvider>>,
    /// Payment backend, when configured
    pub payment: Option<Arc<dyn PaymentProvider>>,
}

/// The compiled use-case aggregate
///
/// Built once during container initialization and treated as read-only
/// thereafter.
pub struct UseCases {
    business_type: String,
    names: CollectionNames,
    clients: RecordService,
    invoices: RecordService,
    subscriptions: RecordService,
    inventory: RecordService,
    payments: RecordService,
    auth: Arc<dyn AuthProvider>,
    payment: Option<Arc<dyn PaymentProvider>>,
    #[allow(dead_code)] // reserved for notification use cases
    email: Option<Arc<dyn EmailProvider>>,
}

impl UseCases {
    /// Assemble the aggregate from resolved providers
    pub fn new(deps: UseCaseDeps) -> Result<Self> {
        if deps.business_type.is_empty() {
            return Err(Error::config("business type must not be empty"));
        }

        let service = |entity: &'static str, collection: &str| {
            RecordService::new(
                entity,
                collection.to_string(),
                Arc::clone(&deps.database),
                Arc::clone(&deps.ids),
            )
        };

        Ok(Self {
            clients: service("clients", &deps.names.clients),
            invoices: service("invoices", &deps.names.invoices),
            subscriptions: service("subscriptions", &deps.names.subscriptions),
            inventory: service("inventory", &deps.names.inventory),
            payments: service("payments", &deps.names.payments),
            business_type: deps.business_type,
            names: deps.names,
            auth: deps.auth,
            payment: deps.payment,
            email: deps.email,
        })
    }

    /// Business type the aggregate was built for
    pub fn business_type(&self) -> &str {
        &self.business_type
    }

    /// Naming set the repositories address
    pub fn collection_names(&self) -> &CollectionNames {
        &self.names
    }

    /// Entity names served by the aggregate
    pub fn entities(&self) -> [&'static str; 5] {
        ENTITIES
    }

    /// Look up the CRUD service for an entity
    pub fn service(&self, entity: &str) -> Option<&RecordService> {
        match entity {
            "clients" => Some(&self.clients),
            "invoices" => Some(&self.invoices),
            "subscriptions" => Some(&self.subscriptions),
            "inventory" => Some(&self.inventory),
            "payments" => Some(&self.payments),
            _ => None,
        }
    }

    /// Verify a bearer token against the auth backend
    pub async fn authenticate(&self, token: &str) -> Result<Principal> {
        self.auth.verify_token(token).await
    }

    /// Charge an invoice through the payment backend and record the
    /// receipt as a payment record
    ///
    /// Fails when no payment provider is configured - callers see the
    /// partial-degradation policy instead of a panic.
    pub async fn charge_invoice(&self, invoice_id: &str) -> Result<ChargeReceipt> {
        let Some(payment) = &self.payment else {
            return Err(Error::config("payment provider not configured"));
        };

        let invoice = self.invoices.get(invoice_id).await?;
        let amount_cents = invoice
            .get("amount_cents")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::invalid_argument("invoice has no amount_cents"))?;
        let currency = invoice
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or("USD")
            .to_string();
        let customer = invoice
            .get("client_id")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let receipt = payment
            .charge(&ChargeRequest {
                amount_cents,
                currency,
                customer,
            })
            .await?;

        self.payments
            .create(json!({
                "invoice_id": invoice_id,
                "charge_id": receipt.charge_id,
                "amount_cents": receipt.amount_cents,
                "currency": receipt.currency,
            }))
            .await?;

        Ok(receipt)
    }
}

impl std::fmt::Debug for UseCases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UseCases")
            .field("business_type", &self.business_type)
            .field("entities", &ENTITIES)
            .field("payment_configured", &self.payment.is_some())
            .finish_non_exhaustive()
    }
}
