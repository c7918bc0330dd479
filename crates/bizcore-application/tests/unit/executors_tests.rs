//! Executor registry tests

use std::sync::Arc;

use serde_json::json;

use bizcore_application::executors::{ExecutorRegistry, OPERATIONS};
use bizcore_application::use_cases::{ENTITIES, UseCaseDeps, UseCases};
use bizcore_domain::naming::CollectionNames;
use bizcore_providers::auth::MockAuthProvider;
use bizcore_providers::database::MemoryDatabaseProvider;
use bizcore_providers::id::UuidIdProvider;

fn use_cases() -> Arc<UseCases> {
    Arc::new(
        UseCases::new(UseCaseDeps {
            business_type: "default".to_string(),
            names: CollectionNames::default(),
            database: Arc::new(MemoryDatabaseProvider::new()),
            auth: Arc::new(MockAuthProvider::new()),
            ids: Arc::new(UuidIdProvider::new()),
            email: None,
            payment: None,
        })
        .unwrap(),
    )
}

#[test]
fn registry_covers_every_entity_operation_pair() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());
    assert_eq!(registry.len(), ENTITIES.len() * OPERATIONS.len());
    for entity in ENTITIES {
        for operation in OPERATIONS {
            let step_id = format!("{entity}.{operation}");
            assert!(registry.get(&step_id).is_some(), "missing {step_id}");
        }
    }
}

#[test]
fn step_ids_are_sorted() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());
    let ids = registry.step_ids();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());

    let create = registry.get("clients.create").unwrap();
    let created = create(json!({"name": "Acme"})).await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["created_at"].is_string());

    let get = registry.get("clients.get").unwrap();
    let fetched = get(json!({"id": id})).await.unwrap();
    assert_eq!(fetched["name"], "Acme");
}

#[tokio::test]
async fn delete_reports_the_deleted_id() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());

    let create = registry.get("invoices.create").unwrap();
    let created = create(json!({"amount_cents": 500})).await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let delete = registry.get("invoices.delete").unwrap();
    let deleted = delete(json!({"id": id.clone()})).await.unwrap();
    assert_eq!(deleted["deleted"], json!(id));

    let list = registry.get("invoices.list").unwrap();
    let remaining = list(json!({})).await.unwrap();
    assert_eq!(remaining, json!([]));
}

#[tokio::test]
async fn get_requires_an_id_field() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());
    let get = registry.get("clients.get").unwrap();

    let err = get(json!({})).await.unwrap_err();
    assert!(err.to_string().contains("requires an id field"));
}

#[test]
fn unknown_step_is_absent() {
    let registry = ExecutorRegistry::from_use_cases(&use_cases());
    assert!(registry.get("clients.truncate").is_none());
    assert!(registry.get("orders.create").is_none());
}
