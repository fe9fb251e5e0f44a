use async_trait::async_trait;
use cardoctor_core::repository::{
    BookingRepository, DeleteResult, InsertOneResult, StoreError, UpdateResult,
};
use cardoctor_shared::Document;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::database::DocumentRow;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn list_bookings(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, doc FROM bookings WHERE doc->>'email' = $1 ORDER BY created_at, id",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn create_booking(&self, booking: Document) -> Result<InsertOneResult, StoreError> {
        let booking_id = Uuid::new_v4();

        sqlx::query("INSERT INTO bookings (id, doc) VALUES ($1, $2)")
            .bind(booking_id)
            .bind(Json(&booking))
            .execute(&self.pool)
            .await?;

        debug!(%booking_id, "Booking inserted");

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: booking_id,
        })
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT id, doc FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(DocumentRow::into_document))
    }

    async fn update_booking_status(&self, id: Uuid, status: Value) -> Result<UpdateResult, StoreError> {
        // matched: the row exists; modified: the stored status actually differed
        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            WITH target AS (
                SELECT id, (doc->'status') IS DISTINCT FROM $2 AS changed
                FROM bookings WHERE id = $1
                FOR UPDATE
            ),
            updated AS (
                UPDATE bookings b
                SET doc = jsonb_set(b.doc, '{status}', $2, true)
                FROM target t
                WHERE b.id = t.id AND t.changed
                RETURNING b.id
            )
            SELECT (SELECT COUNT(*) FROM target), (SELECT COUNT(*) FROM updated)
            "#,
        )
        .bind(id)
        .bind(Json(status))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: matched as u64,
            modified_count: modified as u64,
        })
    }

    async fn delete_booking(&self, id: Uuid) -> Result<DeleteResult, StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }
}
