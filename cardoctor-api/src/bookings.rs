use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use cardoctor_core::repository::{DeleteResult, InsertOneResult, UpdateResult};
use cardoctor_shared::{Document, ID_FIELD};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::AppError,
    middleware::{require_owner, require_session, OwnerScope},
    parse_id,
    state::AppState,
};

/// Listing is gated by session verification, then the ownership check.
/// The remaining booking routes are open.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(list_bookings)
                .route_layer(middleware::from_fn(require_owner))
                .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
                .post(create_booking),
        )
        .route(
            "/bookings/{id}",
            get(get_booking).patch(update_booking_status).delete(delete_booking),
        )
}

/// GET /bookings?email=
async fn list_bookings(
    State(state): State<AppState>,
    Extension(OwnerScope(email)): Extension<OwnerScope>,
) -> Result<Json<Vec<Document>>, AppError> {
    let bookings = state.bookings.list_bookings(&email).await?;
    debug!(count = bookings.len(), "Listed bookings");
    Ok(Json(bookings))
}

/// POST /bookings
/// The body is stored as submitted; the store assigns the identifier.
async fn create_booking(
    State(state): State<AppState>,
    Json(mut booking): Json<Document>,
) -> Result<Json<InsertOneResult>, AppError> {
    booking.remove(ID_FIELD);
    let result = state.bookings.create_booking(booking).await?;
    info!(booking_id = %result.inserted_id, "Booking created");
    Ok(Json(result))
}

/// GET /bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.bookings.get_booking(id).await?))
}

/// PATCH /bookings/{id}
/// Only `status` is taken from the body; a missing status is stored as null.
async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<Document>,
) -> Result<Json<UpdateResult>, AppError> {
    let id = parse_id(&id)?;
    let status = update.get("status").cloned().unwrap_or(Value::Null);
    let result = state.bookings.update_booking_status(id, status).await?;
    info!(booking_id = %id, modified = result.modified_count, "Booking status updated");
    Ok(Json(result))
}

/// DELETE /bookings/{id}
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let id = parse_id(&id)?;
    let result = state.bookings.delete_booking(id).await?;
    info!(booking_id = %id, deleted = result.deleted_count, "Booking deleted");
    Ok(Json(result))
}
