//! Trip planning engine.
//!
//! The engine owns the entity model (trips, trip points, accommodations,
//! routes, expenses and places to visit) and keeps every trip's derived
//! `total_cost` consistent with its cost-bearing children. It also guards
//! the structural rules of the waypoint/route graph and the single default
//! trip.

pub use accommodations::{Accommodation, AccommodationKind, AccommodationStatus};
pub use commands::{AccommodationCmd, ExpenseCmd, PlaceCmd, RouteCmd, TripCmd, TripPointCmd};
pub use currency::Currency;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseCategory, ExpenseSummary, PaymentMethod};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use places::PlaceToVisit;
pub use routes::{Route, TransportationType};
pub use trip_points::{TripPoint, TripPointDetail};
pub use trips::{Trip, TripDetail};
pub use util::parse_uuid;

mod accommodations;
mod commands;
mod currency;
mod error;
mod expenses;
mod money;
mod ops;
mod places;
mod routes;
mod trip_points;
mod trips;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
