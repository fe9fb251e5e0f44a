//! Process-local document store, used when no database is configured and
//! by the test suites.

use async_trait::async_trait;
use cardoctor_core::repository::{
    BookingRepository, DeleteResult, InsertOneResult, ServiceRepository, StoreError, UpdateResult,
};
use cardoctor_shared::document::{field_equals, with_id};
use cardoctor_shared::{Document, ID_FIELD};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Insertion-ordered collection of documents keyed by identifier.
#[derive(Default)]
struct Collection {
    docs: RwLock<Vec<(Uuid, Document)>>,
}

impl Collection {
    async fn find(&self, filter: impl Fn(&Document) -> bool) -> Vec<Document> {
        self.docs
            .read()
            .await
            .iter()
            .filter(|(_, doc)| filter(doc))
            .map(|(id, doc)| with_id(doc.clone(), id))
            .collect()
    }

    async fn find_one(&self, id: Uuid) -> Option<Document> {
        self.docs
            .read()
            .await
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(id, doc)| with_id(doc.clone(), id))
    }

    async fn insert(&self, mut doc: Document) -> Uuid {
        doc.remove(ID_FIELD);
        let id = Uuid::new_v4();
        self.docs.write().await.push((id, doc));
        id
    }
}

#[derive(Default)]
pub struct MemoryServiceRepository {
    services: Collection,
}

impl MemoryServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-known documents. A string `_id` that
    /// parses as a UUID is kept, anything else gets a fresh identifier.
    pub fn with_services(services: Vec<Document>) -> Self {
        let docs = services
            .into_iter()
            .map(|mut doc| {
                let id = doc
                    .remove(ID_FIELD)
                    .and_then(|v| v.as_str().and_then(|s| Uuid::parse_str(s).ok()))
                    .unwrap_or_else(Uuid::new_v4);
                (id, doc)
            })
            .collect();

        Self {
            services: Collection {
                docs: RwLock::new(docs),
            },
        }
    }

    pub async fn insert_service(&self, service: Document) -> Uuid {
        self.services.insert(service).await
    }
}

#[async_trait]
impl ServiceRepository for MemoryServiceRepository {
    async fn list_services(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.services.find(|_| true).await)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.services.find_one(id).await)
    }
}

#[derive(Default)]
pub struct MemoryBookingRepository {
    bookings: Collection,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn list_bookings(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .bookings
            .find(|doc| field_equals(doc, "email", email))
            .await)
    }

    async fn create_booking(&self, booking: Document) -> Result<InsertOneResult, StoreError> {
        let inserted_id = self.bookings.insert(booking).await;
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.bookings.find_one(id).await)
    }

    async fn update_booking_status(&self, id: Uuid, status: Value) -> Result<UpdateResult, StoreError> {
        let mut docs = self.bookings.docs.write().await;
        let Some((_, doc)) = docs.iter_mut().find(|(doc_id, _)| *doc_id == id) else {
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            });
        };

        let modified = doc.get("status") != Some(&status);
        if modified {
            doc.insert("status".to_string(), status);
        }

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_booking(&self, id: Uuid) -> Result<DeleteResult, StoreError> {
        let mut docs = self.bookings.docs.write().await;
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: (before - docs.len()) as u64,
        })
    }
}
