//! Places to visit near a trip point.
//!
//! A place may carry a price, but it is never part of the trip total.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceToVisit {
    pub id: Uuid,
    pub trip_point_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub price: Option<MoneyCents>,
    pub visit_date: Option<NaiveDate>,
    pub visited: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "places_to_visit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trip_point_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub price_minor: Option<i64>,
    pub visit_date: Option<Date>,
    pub visited: bool,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip_points::Entity",
        from = "Column::TripPointId",
        to = "super::trip_points::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TripPoint,
}

impl Related<super::trip_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripPoint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PlaceToVisit> for ActiveModel {
    fn from(value: &PlaceToVisit) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            trip_point_id: ActiveValue::Set(value.trip_point_id),
            name: ActiveValue::Set(value.name.clone()),
            description: ActiveValue::Set(value.description.clone()),
            address: ActiveValue::Set(value.address.clone()),
            website: ActiveValue::Set(value.website.clone()),
            price_minor: ActiveValue::Set(value.price.map(MoneyCents::cents)),
            visit_date: ActiveValue::Set(value.visit_date),
            visited: ActiveValue::Set(value.visited),
            notes: ActiveValue::Set(value.notes.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl From<Model> for PlaceToVisit {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            trip_point_id: model.trip_point_id,
            name: model.name,
            description: model.description,
            address: model.address,
            website: model.website,
            price: model.price_minor.map(MoneyCents::new),
            visit_date: model.visit_date,
            visited: model.visited,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
