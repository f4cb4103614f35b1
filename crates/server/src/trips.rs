//! Trip endpoints.

use api_types::trip::{TripCompleted, TripDetailResponse, TripInput, TripTotal, TripView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::EngineError;
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{trip_cmd, trip_detail_response, trip_view},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TripView>>, ServerError> {
    let trips = state.engine.trips().await?;
    Ok(Json(trips.into_iter().map(trip_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TripInput>,
) -> Result<(StatusCode, Json<TripView>), ServerError> {
    let trip = state.engine.new_trip(trip_cmd(payload)).await?;
    Ok((StatusCode::CREATED, Json(trip_view(trip))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state.engine.trip(trip_id).await?;
    Ok(Json(trip_view(trip)))
}

pub async fn get_default(State(state): State<ServerState>) -> Result<Json<TripView>, ServerError> {
    match state.engine.default_trip().await? {
        Some(trip) => Ok(Json(trip_view(trip))),
        None => Err(EngineError::NotFound("default trip".to_string()).into()),
    }
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripDetailResponse>, ServerError> {
    let detail = state.engine.trip_detail(trip_id).await?;
    Ok(Json(trip_detail_response(detail)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripInput>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state.engine.update_trip(trip_id, trip_cmd(payload)).await?;
    Ok(Json(trip_view(trip)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    Ok(deleted_status(state.engine.delete_trip(trip_id).await?))
}

pub async fn set_default(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.set_default_trip(trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_completed(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripCompleted>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state
        .engine
        .set_trip_completed(trip_id, payload.is_completed)
        .await?;
    Ok(Json(trip_view(trip)))
}

pub async fn recompute(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripTotal>, ServerError> {
    let total = state.engine.recalculate_trip_total_cost(trip_id).await?;
    Ok(Json(TripTotal {
        trip_id,
        total_cost_minor: total.cents(),
    }))
}

pub async fn recompute_all(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TripTotal>>, ServerError> {
    let totals = state.engine.recompute_all_totals().await?;
    Ok(Json(
        totals
            .into_iter()
            .map(|(trip_id, total)| TripTotal {
                trip_id,
                total_cost_minor: total.cents(),
            })
            .collect(),
    ))
}

/// Map an engine delete outcome to a status: absent rows are a 404.
pub(crate) fn deleted_status(deleted: bool) -> StatusCode {
    if deleted {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
