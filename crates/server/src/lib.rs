use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use serde::Serialize;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod accommodations;
mod convert;
mod expenses;
mod places;
mod routes;
mod server;
mod trip_points;
mod trips;

pub mod types {
    pub mod trip {
        pub use api_types::trip::{
            TripCompleted, TripDetailResponse, TripInput, TripTotal, TripView,
        };
    }

    pub mod trip_point {
        pub use api_types::trip_point::{TripPointDetailResponse, TripPointInput, TripPointView};
    }

    pub mod route {
        pub use api_types::route::{RouteInput, RouteNew, RouteView, TransportationType};
    }

    pub mod accommodation {
        pub use api_types::accommodation::{
            AccommodationInput, AccommodationKind, AccommodationStatus, AccommodationView,
        };
    }

    pub mod expense {
        pub use api_types::expense::{
            CategoryTotal, ExpenseCategory, ExpenseInput, ExpenseSummaryResponse, ExpenseView,
            PaymentMethod,
        };
    }

    pub mod place {
        pub use api_types::place::{PlaceInput, PlaceView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Diagnostic text of a 500, stashed in the response extensions.
///
/// The server only copies it into the body when `expose_errors` is on.
#[derive(Clone, Debug)]
pub(crate) struct ErrorDetail(pub(crate) String);

const INTERNAL_ERROR: &str = "internal server error";

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidState(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let ServerError::Engine(err) = self;
        let status = status_for_engine_error(&err);
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            let body = Error {
                error: err.to_string(),
                detail: None,
            };
            return (status, Json(body)).into_response();
        }

        tracing::error!("request failed: {err}");
        let body = Error {
            error: INTERNAL_ERROR.to_string(),
            detail: None,
        };
        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(ErrorDetail(format!("{err:?}")));
        response
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Rebuild a 500 body with its diagnostic detail.
pub(crate) fn internal_error_with_detail(detail: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Error {
            error: INTERNAL_ERROR.to_string(),
            detail: Some(detail),
        }),
    )
        .into_response()
}
