//! Trip point endpoints.

use api_types::trip_point::{TripPointDetailResponse, TripPointInput, TripPointView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{trip_point_cmd, trip_point_detail_response, trip_point_view},
    server::ServerState,
};

pub async fn list(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<TripPointView>>, ServerError> {
    let points = state.engine.trip_points(trip_id).await?;
    Ok(Json(points.into_iter().map(trip_point_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripPointInput>,
) -> Result<(StatusCode, Json<TripPointView>), ServerError> {
    let point = state
        .engine
        .new_trip_point(trip_id, trip_point_cmd(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(trip_point_view(point))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
) -> Result<Json<TripPointView>, ServerError> {
    let point = state.engine.trip_point(point_id).await?;
    Ok(Json(trip_point_view(point)))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
) -> Result<Json<TripPointDetailResponse>, ServerError> {
    let detail = state.engine.trip_point_detail(point_id).await?;
    Ok(Json(trip_point_detail_response(detail)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
    Json(payload): Json<TripPointInput>,
) -> Result<Json<TripPointView>, ServerError> {
    let point = state
        .engine
        .update_trip_point(point_id, trip_point_cmd(payload))
        .await?;
    Ok(Json(trip_point_view(point)))
}

/// Deleting a point that does not exist is a 404 (not idempotent).
pub async fn delete(
    State(state): State<ServerState>,
    Path(point_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip_point(point_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
