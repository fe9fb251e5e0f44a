//! Runs against a real PostgreSQL instance:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/cardoctor_test cargo test -p cardoctor-store -- --ignored
//! ```
//!
//! Every test writes under its own random email, so runs can share a database.

use cardoctor_core::repository::{BookingRepository, ServiceRepository};
use cardoctor_shared::{Document, ID_FIELD};
use cardoctor_store::{DbClient, StoreBookingRepository, StoreServiceRepository};
use serde_json::{json, Value};
use uuid::Uuid;

async fn connect() -> DbClient {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let db = DbClient::new(&url, 2).await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn unique_email() -> String {
    format!("{}@store.test", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_then_get_round_trips_document() {
    let db = connect().await;
    let repo = StoreBookingRepository::new(db.pool.clone());
    let booking = doc(json!({
        "email": unique_email(),
        "service": "Full car repair",
        "price": 200,
        "date": "2024-05-01",
        "extras": {"wash": true}
    }));

    let created = repo.create_booking(booking.clone()).await.unwrap();
    assert!(created.acknowledged);

    let mut stored = repo.get_booking(created.inserted_id).await.unwrap().unwrap();
    assert_eq!(stored.remove(ID_FIELD), Some(json!(created.inserted_id.to_string())));
    assert_eq!(stored, booking);

    assert!(repo.get_booking(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_returns_only_matching_email() {
    let db = connect().await;
    let repo = StoreBookingRepository::new(db.pool.clone());
    let owner = unique_email();
    let other = unique_email();

    let first = repo.create_booking(doc(json!({"email": owner, "n": 1}))).await.unwrap();
    repo.create_booking(doc(json!({"email": other, "n": 2}))).await.unwrap();
    let second = repo.create_booking(doc(json!({"email": owner, "n": 3}))).await.unwrap();
    // Same text, but not a string: never matches
    repo.create_booking(doc(json!({"email": [owner.clone()], "n": 4}))).await.unwrap();

    let listed = repo.list_bookings(&owner).await.unwrap();

    let mut ids: Vec<Value> = listed.iter().map(|b| b[ID_FIELD].clone()).collect();
    let mut expected = vec![
        json!(first.inserted_id.to_string()),
        json!(second.inserted_id.to_string()),
    ];
    ids.sort_by_key(|v| v.to_string());
    expected.sort_by_key(|v| v.to_string());
    assert_eq!(ids, expected);
    assert!(listed.iter().all(|b| b["email"] == json!(owner)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_status_counts_and_preserves_other_fields() {
    let db = connect().await;
    let repo = StoreBookingRepository::new(db.pool.clone());
    let booking = doc(json!({"email": unique_email(), "price": 80, "status": "pending"}));
    let id = repo.create_booking(booking.clone()).await.unwrap().inserted_id;

    let changed = repo.update_booking_status(id, json!("confirm")).await.unwrap();
    assert_eq!((changed.matched_count, changed.modified_count), (1, 1));

    let unchanged = repo.update_booking_status(id, json!("confirm")).await.unwrap();
    assert_eq!((unchanged.matched_count, unchanged.modified_count), (1, 0));

    let missing = repo.update_booking_status(Uuid::new_v4(), json!("confirm")).await.unwrap();
    assert_eq!((missing.matched_count, missing.modified_count), (0, 0));

    let mut stored = repo.get_booking(id).await.unwrap().unwrap();
    stored.remove(ID_FIELD);
    let mut expected = booking;
    expected.insert("status".to_string(), json!("confirm"));
    assert_eq!(stored, expected);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_adds_status_when_absent() {
    let db = connect().await;
    let repo = StoreBookingRepository::new(db.pool.clone());
    let id = repo
        .create_booking(doc(json!({"email": unique_email()})))
        .await
        .unwrap()
        .inserted_id;

    let result = repo.update_booking_status(id, Value::Null).await.unwrap();
    assert_eq!((result.matched_count, result.modified_count), (1, 1));

    let stored = repo.get_booking(id).await.unwrap().unwrap();
    assert_eq!(stored.get("status"), Some(&Value::Null));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_reports_count() {
    let db = connect().await;
    let repo = StoreBookingRepository::new(db.pool.clone());
    let id = repo
        .create_booking(doc(json!({"email": unique_email()})))
        .await
        .unwrap()
        .inserted_id;

    assert_eq!(repo.delete_booking(id).await.unwrap().deleted_count, 1);
    assert_eq!(repo.delete_booking(id).await.unwrap().deleted_count, 0);
    assert!(repo.get_booking(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_service_attaches_id() {
    let db = connect().await;
    let repo = StoreServiceRepository::new(db.pool.clone());
    let id = Uuid::new_v4();
    let service = doc(json!({"title": "Engine oil change", "price": "20.00"}));

    sqlx::query("INSERT INTO services (id, doc) VALUES ($1, $2)")
        .bind(id)
        .bind(sqlx::types::Json(&service))
        .execute(&db.pool)
        .await
        .unwrap();

    let stored = repo.get_service(id).await.unwrap().unwrap();
    assert_eq!(stored[ID_FIELD], json!(id.to_string()));
    assert_eq!(stored["title"], json!("Engine oil change"));

    let listed = repo.list_services().await.unwrap();
    assert!(listed.iter().any(|s| s[ID_FIELD] == json!(id.to_string())));

    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&db.pool)
        .await
        .unwrap();
}
