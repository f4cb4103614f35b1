//! Route endpoints.

use api_types::route::{RouteInput, RouteNew, RouteView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{route_cmd, route_view},
    server::ServerState,
    trips::deleted_status,
};

pub async fn list_for_trip(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<RouteView>>, ServerError> {
    let routes = state.engine.routes_for_trip(trip_id).await?;
    Ok(Json(routes.into_iter().map(route_view).collect()))
}

pub async fn between(
    State(state): State<ServerState>,
    Path((from_point_id, to_point_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<RouteView>>, ServerError> {
    let routes = state
        .engine
        .routes_between(from_point_id, to_point_id)
        .await?;
    Ok(Json(routes.into_iter().map(route_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RouteNew>,
) -> Result<(StatusCode, Json<RouteView>), ServerError> {
    let route = state
        .engine
        .new_route(
            payload.from_point_id,
            payload.to_point_id,
            route_cmd(payload.route),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(route_view(route))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteView>, ServerError> {
    let route = state.engine.route(route_id).await?;
    Ok(Json(route_view(route)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(route_id): Path<Uuid>,
    Json(payload): Json<RouteInput>,
) -> Result<Json<RouteView>, ServerError> {
    let route = state
        .engine
        .update_route(route_id, route_cmd(payload))
        .await?;
    Ok(Json(route_view(route)))
}

pub async fn select(
    State(state): State<ServerState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteView>, ServerError> {
    let route = state.engine.select_route(route_id).await?;
    Ok(Json(route_view(route)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(route_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    Ok(deleted_status(state.engine.delete_route(route_id).await?))
}
