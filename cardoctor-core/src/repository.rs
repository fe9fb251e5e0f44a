use async_trait::async_trait;
use cardoctor_shared::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of inserting one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

/// Outcome of updating one document by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of deleting one document by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Read-only access to the service catalog.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Document>, StoreError>;

    async fn get_service(&self, id: Uuid) -> Result<Option<Document>, StoreError>;
}

/// Booking ledger. Documents are stored as submitted; only `status` is
/// ever rewritten in place.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self, email: &str) -> Result<Vec<Document>, StoreError>;

    async fn create_booking(&self, booking: Document) -> Result<InsertOneResult, StoreError>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Document>, StoreError>;

    async fn update_booking_status(&self, id: Uuid, status: Value) -> Result<UpdateResult, StoreError>;

    async fn delete_booking(&self, id: Uuid) -> Result<DeleteResult, StoreError>;
}
