use axum::{
    Router,
    extract::State,
    middleware,
    response::Response,
    routing::{get, post, put},
};

use std::sync::Arc;

use crate::{ErrorDetail, accommodations, expenses, places, routes, trip_points, trips};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Put diagnostic detail into 500 bodies. Never on in production.
    pub expose_errors: bool,
}

impl ServerState {
    pub fn new(engine: Engine, expose_errors: bool) -> Self {
        Self {
            engine: Arc::new(engine),
            expose_errors,
        }
    }
}

async fn expose_error_detail(State(state): State<ServerState>, response: Response) -> Response {
    if !state.expose_errors {
        return response;
    }
    match response.extensions().get::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => crate::internal_error_with_detail(detail.clone()),
        None => response,
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/trips", get(trips::list).post(trips::create))
        .route("/trips/default", get(trips::get_default))
        .route("/trips/recompute", post(trips::recompute_all))
        .route(
            "/trips/{trip_id}",
            get(trips::get).put(trips::update).delete(trips::delete),
        )
        .route("/trips/{trip_id}/detail", get(trips::detail))
        .route("/trips/{trip_id}/default", post(trips::set_default))
        .route("/trips/{trip_id}/completed", put(trips::set_completed))
        .route("/trips/{trip_id}/recompute", post(trips::recompute))
        .route(
            "/trips/{trip_id}/points",
            get(trip_points::list).post(trip_points::create),
        )
        .route("/trips/{trip_id}/routes", get(routes::list_for_trip))
        .route(
            "/trips/{trip_id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route("/trips/{trip_id}/expenses/summary", get(expenses::summary))
        .route(
            "/points/{point_id}",
            get(trip_points::get)
                .put(trip_points::update)
                .delete(trip_points::delete),
        )
        .route("/points/{point_id}/detail", get(trip_points::detail))
        .route(
            "/points/{point_id}/accommodations",
            get(accommodations::list).post(accommodations::create),
        )
        .route(
            "/points/{point_id}/places",
            get(places::list).post(places::create),
        )
        .route("/legs/{from_point_id}/{to_point_id}", get(routes::between))
        .route("/routes", post(routes::create))
        .route(
            "/routes/{route_id}",
            get(routes::get).put(routes::update).delete(routes::delete),
        )
        .route("/routes/{route_id}/select", post(routes::select))
        .route(
            "/accommodations/{accommodation_id}",
            get(accommodations::get)
                .put(accommodations::update)
                .delete(accommodations::delete),
        )
        .route(
            "/expenses/{expense_id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route(
            "/places/{place_id}",
            get(places::get).put(places::update).delete(places::delete),
        )
        .layer(middleware::map_response_with_state(
            state.clone(),
            expose_error_detail,
        ))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: &str, expose_errors: bool) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(engine, listener, expose_errors).await
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    expose_errors: bool,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine, expose_errors);
    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    expose_errors: bool,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener, expose_errors).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
