//! Integration tests for the PostgreSQL key-value store and project store.

use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use sitecraft_core::project::ProjectStatus;
use sitecraft_core::store::{project_key, KeyValueStore, ProjectStore, StoreError, PROJECTS_SET_KEY};
use sitecraft_db::repositories::KvRepo;
use sitecraft_db::PgKeyValueStore;

fn project_doc(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": "design",
        "customer": { "name": "Anna", "email": "anna@example.nl" },
        "onboardingData": { "reminderCount": 0, "wizardStep": 4 },
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_replaces_value_and_bumps_updated_at(pool: PgPool) {
    let first = KvRepo::upsert(&pool, "k", &json!({"v": 1})).await.unwrap();
    let second = KvRepo::upsert(&pool, "k", &json!({"v": 2})).await.unwrap();

    assert_eq!(second.value, json!({"v": 2}));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_member_is_idempotent(pool: PgPool) {
    assert!(KvRepo::add_member(&pool, "projects", "p-1").await.unwrap());
    assert!(!KvRepo::add_member(&pool, "projects", "p-1").await.unwrap());
    assert_eq!(KvRepo::members(&pool, "projects").await.unwrap(), vec!["p-1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_keys_and_sets_are_empty(pool: PgPool) {
    let store = PgKeyValueStore::new(pool);
    assert_eq!(store.get("nope").await.unwrap(), None);
    assert!(store.members("nope").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_store_round_trip_keeps_unknown_fields(pool: PgPool) {
    let kv = Arc::new(PgKeyValueStore::new(pool));
    kv.set(&project_key("p-1"), &project_doc("p-1")).await.unwrap();
    kv.add_member(PROJECTS_SET_KEY, "p-1").await.unwrap();

    let projects = ProjectStore::new(kv.clone());
    assert_eq!(projects.list_ids().await.unwrap(), vec!["p-1"]);

    let mut project = projects.load("p-1").await.unwrap().expect("project exists");
    assert_eq!(project.status, ProjectStatus::Design);

    project.onboarding_data.reminder_count = 2;
    projects.save(&project).await.unwrap();

    let raw = kv.get(&project_key("p-1")).await.unwrap().unwrap();
    assert_eq!(raw["onboardingData"]["reminderCount"], 2);
    assert_eq!(raw["onboardingData"]["wizardStep"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_project_reports_decode_error(pool: PgPool) {
    let kv = Arc::new(PgKeyValueStore::new(pool));
    kv.set(&project_key("broken"), &json!({"id": "broken"}))
        .await
        .unwrap();

    let projects = ProjectStore::new(kv);
    let err = projects.load("broken").await.unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}
