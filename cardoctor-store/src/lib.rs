pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod memory_repo;
pub mod service_repo;

use std::sync::Arc;

use cardoctor_core::repository::{BookingRepository, ServiceRepository, StoreError};
use cardoctor_shared::Document;
use tracing::{info, warn};

pub use booking_repo::StoreBookingRepository;
pub use database::DbClient;
pub use memory_repo::{MemoryBookingRepository, MemoryServiceRepository};
pub use service_repo::StoreServiceRepository;

/// The two collections plus the pool behind them, created once at startup.
#[derive(Clone)]
pub struct Repositories {
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    db: Option<DbClient>,
}

impl Repositories {
    /// Postgres when a connection URL is configured, in-memory otherwise.
    pub async fn connect(config: &app_config::DatabaseConfig) -> Result<Self, StoreError> {
        match config.connection_url() {
            Some(url) => {
                let db = DbClient::new(&url, config.max_connections).await?;
                db.migrate().await?;
                info!("Connected to PostgreSQL document store");
                Ok(Self {
                    services: Arc::new(StoreServiceRepository::new(db.pool.clone())),
                    bookings: Arc::new(StoreBookingRepository::new(db.pool.clone())),
                    db: Some(db),
                })
            }
            None => {
                warn!("No database configured, using in-memory document store");
                let services = match &config.catalog_seed {
                    Some(path) => load_catalog_seed(path).await?,
                    None => Vec::new(),
                };
                info!(count = services.len(), "Catalog loaded");
                Ok(Self::in_memory(services))
            }
        }
    }

    pub fn in_memory(services: Vec<Document>) -> Self {
        Self {
            services: Arc::new(MemoryServiceRepository::with_services(services)),
            bookings: Arc::new(MemoryBookingRepository::new()),
            db: None,
        }
    }

    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

async fn load_catalog_seed(path: &str) -> Result<Vec<Document>, StoreError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
