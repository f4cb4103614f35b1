//! Trip points (waypoints): the ordered stops of a trip.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

/// A stop within a trip.
///
/// `order` defines the trip sequence. It is expected to grow monotonically
/// but is not required to be contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct TripPoint {
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

/// A trip point with everything hanging off it.
#[derive(Clone, Debug, PartialEq)]
pub struct TripPointDetail {
    pub point: TripPoint,
    pub accommodations: Vec<crate::Accommodation>,
    /// Routes leaving this point.
    pub outgoing_routes: Vec<crate::Route>,
    /// Routes arriving at this point.
    pub incoming_routes: Vec<crate::Route>,
    pub places: Vec<crate::PlaceToVisit>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trip_points")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub order_index: i32,
    pub arrival_date: Date,
    pub departure_date: Date,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trips::Entity",
        from = "Column::TripId",
        to = "super::trips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trip,
    #[sea_orm(has_many = "super::accommodations::Entity")]
    Accommodations,
    #[sea_orm(has_many = "super::places::Entity")]
    Places,
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::accommodations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accommodations.def()
    }
}

impl Related<super::places::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Places.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TripPoint> for ActiveModel {
    fn from(value: &TripPoint) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            trip_id: ActiveValue::Set(value.trip_id),
            name: ActiveValue::Set(value.name.clone()),
            order_index: ActiveValue::Set(value.order),
            arrival_date: ActiveValue::Set(value.arrival_date),
            departure_date: ActiveValue::Set(value.departure_date),
            notes: ActiveValue::Set(value.notes.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl From<Model> for TripPoint {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            trip_id: model.trip_id,
            name: model.name,
            order: model.order_index,
            arrival_date: model.arrival_date,
            departure_date: model.departure_date,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
