use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use cardoctor_shared::{document::project, Document};

use crate::{error::AppError, parse_id, state::AppState};

/// Fields returned when reading a single catalog entry.
pub const SERVICE_SUMMARY_FIELDS: [&str; 4] = ["title", "price", "service_id", "img"];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
}

/// GET /services
async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let services = state.services.list_services().await?;
    Ok(Json(services))
}

/// GET /services/{id}
/// Unknown ids yield a `null` body.
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, AppError> {
    let id = parse_id(&id)?;
    let service = state.services.get_service(id).await?;
    Ok(Json(service.map(|doc| project(doc, &SERVICE_SUMMARY_FIELDS))))
}
