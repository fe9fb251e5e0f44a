use async_trait::async_trait;
use cardoctor_core::repository::{ServiceRepository, StoreError};
use cardoctor_shared::Document;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::DocumentRow;

pub struct StoreServiceRepository {
    pool: PgPool,
}

impl StoreServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for StoreServiceRepository {
    async fn list_services(&self) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, doc FROM services ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT id, doc FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(DocumentRow::into_document))
    }
}
