//! Wire types shared by the HTTP server and its clients.
//!
//! Money always travels as integer minor units (`*_minor`), never as floats.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Chf,
    Pln,
    Jpy,
}

pub mod trip {
    use super::*;

    /// Request body for creating or replacing a trip.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripInput {
        pub name: String,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        #[serde(default)]
        pub is_completed: bool,
        #[serde(default)]
        pub is_default: bool,
        pub description: Option<String>,
        pub planned_cost_minor: Option<i64>,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripView {
        pub id: Uuid,
        pub name: String,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub is_completed: bool,
        pub is_default: bool,
        pub description: Option<String>,
        pub planned_cost_minor: Option<i64>,
        /// Derived: expenses + confirmed/paid stays + selected routes.
        pub total_cost_minor: i64,
        /// `planned_cost_minor - total_cost_minor`, when a budget is set.
        pub remaining_budget_minor: Option<i64>,
        pub currency: Currency,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripDetailResponse {
        pub trip: TripView,
        pub points: Vec<super::trip_point::TripPointView>,
        pub expenses: Vec<super::expense::ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripCompleted {
        pub is_completed: bool,
    }

    /// A freshly recomputed trip total.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripTotal {
        pub trip_id: Uuid,
        pub total_cost_minor: i64,
    }
}

pub mod trip_point {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripPointInput {
        pub name: String,
        /// Position of the point inside its trip.
        #[serde(default)]
        pub order: i32,
        pub arrival_date: NaiveDate,
        pub departure_date: NaiveDate,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripPointView {
        pub id: Uuid,
        pub trip_id: Uuid,
        pub name: String,
        pub order: i32,
        pub arrival_date: NaiveDate,
        pub departure_date: NaiveDate,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripPointDetailResponse {
        pub point: TripPointView,
        pub accommodations: Vec<super::accommodation::AccommodationView>,
        pub outgoing_routes: Vec<super::route::RouteView>,
        pub incoming_routes: Vec<super::route::RouteView>,
        pub places: Vec<super::place::PlaceView>,
    }
}

pub mod route {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransportationType {
        Flight,
        Train,
        Bus,
        Car,
        Walking,
        Other,
    }

    /// Mutable fields of a route.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RouteInput {
        pub name: String,
        pub transportation: TransportationType,
        pub carrier: Option<String>,
        pub departure_at: Option<DateTime<Utc>>,
        pub arrival_at: Option<DateTime<Utc>>,
        pub duration_minutes: Option<i32>,
        pub cost_minor: Option<i64>,
        #[serde(default)]
        pub is_selected: bool,
        pub notes: Option<String>,
    }

    /// Request body for creating a route. Endpoints cannot change afterwards.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RouteNew {
        pub from_point_id: Uuid,
        pub to_point_id: Uuid,
        #[serde(flatten)]
        pub route: RouteInput,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RouteView {
        pub id: Uuid,
        pub from_point_id: Uuid,
        pub to_point_id: Uuid,
        pub name: String,
        pub transportation: TransportationType,
        pub carrier: Option<String>,
        pub departure_at: Option<DateTime<Utc>>,
        pub arrival_at: Option<DateTime<Utc>>,
        pub duration_minutes: Option<i32>,
        pub cost_minor: Option<i64>,
        pub is_selected: bool,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod accommodation {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AccommodationKind {
        Booking,
        Hotel,
        Apartment,
        Airbnb,
        Other,
    }

    /// Only `confirmed` and `paid` stays count toward the trip total.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AccommodationStatus {
        #[default]
        Planned,
        Confirmed,
        PaymentRequired,
        Paid,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccommodationInput {
        pub name: String,
        pub kind: AccommodationKind,
        pub address: Option<String>,
        pub check_in: DateTime<Utc>,
        pub check_out: DateTime<Utc>,
        pub website: Option<String>,
        pub cost_minor: i64,
        #[serde(default)]
        pub status: AccommodationStatus,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccommodationView {
        pub id: Uuid,
        pub trip_point_id: Uuid,
        pub name: String,
        pub kind: AccommodationKind,
        pub address: Option<String>,
        pub check_in: DateTime<Utc>,
        pub check_out: DateTime<Utc>,
        pub website: Option<String>,
        pub cost_minor: i64,
        pub status: AccommodationStatus,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExpenseCategory {
        Transportation,
        Restaurant,
        Food,
        Entertainment,
        Shopping,
        Fee,
        Living,
        Other,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMethod {
        Cash,
        #[default]
        CreditCard,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseInput {
        pub description: String,
        pub category: ExpenseCategory,
        /// Must be > 0.
        pub amount_minor: i64,
        pub expense_date: NaiveDate,
        #[serde(default)]
        pub payment_method: PaymentMethod,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub trip_id: Uuid,
        pub description: String,
        pub category: ExpenseCategory,
        pub amount_minor: i64,
        pub expense_date: NaiveDate,
        pub payment_method: PaymentMethod,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: ExpenseCategory,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseSummaryResponse {
        pub trip_id: Uuid,
        pub by_category: Vec<CategoryTotal>,
        pub total_minor: i64,
    }
}

pub mod place {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlaceInput {
        pub name: String,
        pub description: Option<String>,
        pub address: Option<String>,
        pub website: Option<String>,
        pub price_minor: Option<i64>,
        pub visit_date: Option<NaiveDate>,
        #[serde(default)]
        pub visited: bool,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlaceView {
        pub id: Uuid,
        pub trip_point_id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub address: Option<String>,
        pub website: Option<String>,
        pub price_minor: Option<i64>,
        pub visit_date: Option<NaiveDate>,
        pub visited: bool,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}
