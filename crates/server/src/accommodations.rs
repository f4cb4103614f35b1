//! Accommodation endpoints.

use api_types::accommodation::{AccommodationInput, AccommodationView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{accommodation_cmd, accommodation_view},
    server::ServerState,
    trips::deleted_status,
};

pub async fn list(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
) -> Result<Json<Vec<AccommodationView>>, ServerError> {
    let stays = state.engine.accommodations(point_id).await?;
    Ok(Json(stays.into_iter().map(accommodation_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
    Json(payload): Json<AccommodationInput>,
) -> Result<(StatusCode, Json<AccommodationView>), ServerError> {
    let stay = state
        .engine
        .new_accommodation(point_id, accommodation_cmd(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(accommodation_view(stay))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(accommodation_id): Path<Uuid>,
) -> Result<Json<AccommodationView>, ServerError> {
    let stay = state.engine.accommodation(accommodation_id).await?;
    Ok(Json(accommodation_view(stay)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(accommodation_id): Path<Uuid>,
    Json(payload): Json<AccommodationInput>,
) -> Result<Json<AccommodationView>, ServerError> {
    let stay = state
        .engine
        .update_accommodation(accommodation_id, accommodation_cmd(payload))
        .await?;
    Ok(Json(accommodation_view(stay)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(accommodation_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    Ok(deleted_status(
        state.engine.delete_accommodation(accommodation_id).await?,
    ))
}
