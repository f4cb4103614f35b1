//! Places to visit endpoints.

use api_types::place::{PlaceInput, PlaceView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{place_cmd, place_view},
    server::ServerState,
    trips::deleted_status,
};

pub async fn list(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
) -> Result<Json<Vec<PlaceView>>, ServerError> {
    let places = state.engine.places(point_id).await?;
    Ok(Json(places.into_iter().map(place_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
    Json(payload): Json<PlaceInput>,
) -> Result<(StatusCode, Json<PlaceView>), ServerError> {
    let place = state.engine.new_place(point_id, place_cmd(payload)).await?;
    Ok((StatusCode::CREATED, Json(place_view(place))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceView>, ServerError> {
    let place = state.engine.place(place_id).await?;
    Ok(Json(place_view(place)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(place_id): Path<Uuid>,
    Json(payload): Json<PlaceInput>,
) -> Result<Json<PlaceView>, ServerError> {
    let place = state
        .engine
        .update_place(place_id, place_cmd(payload))
        .await?;
    Ok(Json(place_view(place)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(place_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    Ok(deleted_status(state.engine.delete_place(place_id).await?))
}
