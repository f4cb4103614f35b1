//! Routes: transportation legs between two trip points of the same trip.
//!
//! Several routes may exist for the same `from -> to` pair; they are
//! alternatives and `is_selected` marks the one actually taken.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::impl_labels};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportationType {
    Flight,
    Train,
    Bus,
    Car,
    Walking,
    Other,
}

impl_labels!(TransportationType, "transportation type", {
    Flight => "flight",
    Train => "train",
    Bus => "bus",
    Car => "car",
    Walking => "walking",
    Other => "other",
});

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub from_point_id: Uuid,
    pub to_point_id: Uuid,
    pub name: String,
    pub transportation: TransportationType,
    pub carrier: Option<String>,
    pub departure_at: Option<DateTime<Utc>>,
    pub arrival_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub cost: Option<MoneyCents>,
    pub is_selected: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    /// Cost this route contributes to its trip's total: only selected
    /// routes with a known cost count.
    #[must_use]
    pub fn cost_contribution(&self) -> MoneyCents {
        match (self.is_selected, self.cost) {
            (true, Some(cost)) => cost,
            _ => MoneyCents::ZERO,
        }
    }
}

pub(crate) fn validate_route(
    cost: Option<MoneyCents>,
    duration_minutes: Option<i32>,
) -> ResultEngine<()> {
    if cost.is_some_and(MoneyCents::is_negative) {
        return Err(EngineError::InvalidArgument(
            "route cost must be >= 0".to_string(),
        ));
    }
    if duration_minutes.is_some_and(|minutes| minutes < 0) {
        return Err(EngineError::InvalidArgument(
            "route duration must be >= 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub from_point_id: Uuid,
    pub to_point_id: Uuid,
    pub name: String,
    pub transportation: String,
    pub carrier: Option<String>,
    pub departure_at: Option<DateTimeUtc>,
    pub arrival_at: Option<DateTimeUtc>,
    pub duration_minutes: Option<i32>,
    pub cost_minor: Option<i64>,
    pub is_selected: bool,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip_points::Entity",
        from = "Column::FromPointId",
        to = "super::trip_points::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    FromPoint,
    #[sea_orm(
        belongs_to = "super::trip_points::Entity",
        from = "Column::ToPointId",
        to = "super::trip_points::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ToPoint,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Route> for ActiveModel {
    fn from(value: &Route) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            from_point_id: ActiveValue::Set(value.from_point_id),
            to_point_id: ActiveValue::Set(value.to_point_id),
            name: ActiveValue::Set(value.name.clone()),
            transportation: ActiveValue::Set(value.transportation.as_str().to_string()),
            carrier: ActiveValue::Set(value.carrier.clone()),
            departure_at: ActiveValue::Set(value.departure_at),
            arrival_at: ActiveValue::Set(value.arrival_at),
            duration_minutes: ActiveValue::Set(value.duration_minutes),
            cost_minor: ActiveValue::Set(value.cost.map(MoneyCents::cents)),
            is_selected: ActiveValue::Set(value.is_selected),
            notes: ActiveValue::Set(value.notes.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl TryFrom<Model> for Route {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            from_point_id: model.from_point_id,
            to_point_id: model.to_point_id,
            name: model.name,
            transportation: TransportationType::try_from(model.transportation.as_str())?,
            carrier: model.carrier,
            departure_at: model.departure_at,
            arrival_at: model.arrival_at,
            duration_minutes: model.duration_minutes,
            cost: model.cost_minor.map(MoneyCents::new),
            is_selected: model.is_selected,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
