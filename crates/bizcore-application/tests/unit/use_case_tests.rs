//! Use-case aggregate tests

use std::sync::Arc;

use serde_json::json;

use bizcore_application::use_cases::{UseCaseDeps, UseCases};
use bizcore_domain::naming::CollectionNames;
use bizcore_providers::auth::MockAuthProvider;
use bizcore_providers::database::MemoryDatabaseProvider;
use bizcore_providers::id::UuidIdProvider;
use bizcore_providers::payment::MockPaymentProvider;

fn deps() -> UseCaseDeps {
    UseCaseDeps {
        business_type: "retail".to_string(),
        names: CollectionNames::default(),
        database: Arc::new(MemoryDatabaseProvider::new()),
        auth: Arc::new(MockAuthProvider::new()),
        ids: Arc::new(UuidIdProvider::new()),
        email: None,
        payment: None,
    }
}

#[test]
fn empty_business_type_is_rejected() {
    let use_cases = UseCases::new(UseCaseDeps {
        business_type: String::new(),
        ..deps()
    });
    assert!(use_cases.is_err());
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let use_cases = UseCases::new(deps()).unwrap();
    let clients = use_cases.service("clients").unwrap();

    let created = clients.create(json!({"name": "Acme"})).await.unwrap();
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["created_at"], created["updated_at"]);
}

#[tokio::test]
async fn create_keeps_a_caller_supplied_id() {
    let use_cases = UseCases::new(deps()).unwrap();
    let clients = use_cases.service("clients").unwrap();

    let created = clients
        .create(json!({"id": "c-42", "name": "Acme"}))
        .await
        .unwrap();
    assert_eq!(created["id"], json!("c-42"));
}

#[tokio::test]
async fn create_rejects_non_object_payloads() {
    let use_cases = UseCases::new(deps()).unwrap();
    let clients = use_cases.service("clients").unwrap();

    assert!(clients.create(json!("just a string")).await.is_err());
    assert!(clients.create(json!({})).await.is_err());
}

#[tokio::test]
async fn update_merges_and_protects_identity_fields() {
    let use_cases = UseCases::new(deps()).unwrap();
    let clients = use_cases.service("clients").unwrap();

    let created = clients.create(json!({"name": "Acme"})).await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let updated = clients
        .update(&id, json!({"id": "evil", "created_at": "1970-01-01", "name": "Acme Corp"}))
        .await
        .unwrap();
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["name"], json!("Acme Corp"));
}

#[tokio::test]
async fn get_and_delete_missing_records_are_not_found() {
    let use_cases = UseCases::new(deps()).unwrap();
    let clients = use_cases.service("clients").unwrap();

    assert!(clients.get("missing").await.is_err());
    assert!(clients.delete("missing").await.is_err());
}

#[tokio::test]
async fn charge_invoice_without_payment_provider_fails_cleanly() {
    let use_cases = UseCases::new(deps()).unwrap();
    let err = use_cases.charge_invoice("inv-1").await.unwrap_err();
    assert!(err.to_string().contains("payment provider not configured"));
}

#[tokio::test]
async fn charge_invoice_records_a_payment() {
    let payment = Arc::new(MockPaymentProvider::new());
    let payment_port: Arc<dyn bizcore_domain::ports::providers::PaymentProvider> =
        payment.clone();
    let use_cases = UseCases::new(UseCaseDeps {
        payment: Some(payment_port),
        ..deps()
    })
    .unwrap();

    let invoice = use_cases
        .service("invoices")
        .unwrap()
        .create(json!({"amount_cents": 1500, "currency": "EUR", "client_id": "c-1"}))
        .await
        .unwrap();
    let invoice_id = invoice["id"].as_str().unwrap();

    let receipt = use_cases.charge_invoice(invoice_id).await.unwrap();
    assert_eq!(receipt.amount_cents, 1500);
    assert_eq!(receipt.currency, "EUR");
    assert_eq!(payment.charge_count(), 1);

    let payments = use_cases.service("payments").unwrap().list().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["invoice_id"], json!(invoice_id));
}

#[tokio::test]
async fn authenticate_delegates_to_the_auth_backend() {
    let use_cases = UseCases::new(deps()).unwrap();

    let principal = use_cases.authenticate("token-1").await.unwrap();
    assert_eq!(principal.subject, "token-1");
    assert!(use_cases.authenticate("").await.is_err());
}
