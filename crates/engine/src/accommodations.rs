//! Accommodations booked at a trip point.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::impl_labels};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccommodationKind {
    Booking,
    Hotel,
    Apartment,
    Airbnb,
    Other,
}

impl_labels!(AccommodationKind, "accommodation type", {
    Booking => "booking",
    Hotel => "hotel",
    Apartment => "apartment",
    Airbnb => "airbnb",
    Other => "other",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccommodationStatus {
    Planned,
    Confirmed,
    PaymentRequired,
    Paid,
    Cancelled,
}

impl_labels!(AccommodationStatus, "accommodation status", {
    Planned => "planned",
    Confirmed => "confirmed",
    PaymentRequired => "payment_required",
    Paid => "paid",
    Cancelled => "cancelled",
});

impl AccommodationStatus {
    /// Only confirmed or paid stays count toward the trip total.
    #[must_use]
    pub const fn counts_toward_cost(self) -> bool {
        matches!(self, Self::Confirmed | Self::Paid)
    }
}

/// Lodging at a trip point.
#[derive(Clone, Debug, PartialEq)]
pub struct Accommodation {
    pub id: Uuid,
    pub trip_point_id: Uuid,
    pub name: String,
    pub kind: AccommodationKind,
    pub address: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub website: Option<String>,
    pub cost: MoneyCents,
    pub status: AccommodationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Accommodation {
    /// Cost this stay contributes to its trip's total.
    #[must_use]
    pub fn cost_contribution(&self) -> MoneyCents {
        if self.status.counts_toward_cost() {
            self.cost
        } else {
            MoneyCents::ZERO
        }
    }
}

/// Validate the stay window and the cost of an accommodation.
pub(crate) fn validate_stay(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    cost: MoneyCents,
) -> ResultEngine<()> {
    if check_out < check_in {
        return Err(EngineError::InvalidArgument(
            "check-out must not be before check-in".to_string(),
        ));
    }
    if cost.is_negative() {
        return Err(EngineError::InvalidArgument(
            "accommodation cost must be >= 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accommodations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trip_point_id: Uuid,
    pub name: String,
    pub kind: String,
    pub address: Option<String>,
    pub check_in: DateTimeUtc,
    pub check_out: DateTimeUtc,
    pub website: Option<String>,
    pub cost_minor: i64,
    pub status: String,
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

impl From<&Accommodation> for ActiveModel {
    fn from(value: &Accommodation) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            trip_point_id: ActiveValue::Set(value.trip_point_id),
            name: ActiveValue::Set(value.name.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            address: ActiveValue::Set(value.address.clone()),
            check_in: ActiveValue::Set(value.check_in),
            check_out: ActiveValue::Set(value.check_out),
            website: ActiveValue::Set(value.website.clone()),
            cost_minor: ActiveValue::Set(value.cost.cents()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            notes: ActiveValue::Set(value.notes.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl TryFrom<Model> for Accommodation {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            trip_point_id: model.trip_point_id,
            name: model.name,
            kind: AccommodationKind::try_from(model.kind.as_str())?,
            address: model.address,
            check_in: model.check_in,
            check_out: model.check_out,
            website: model.website,
            cost: MoneyCents::new(model.cost_minor),
            status: AccommodationStatus::try_from(model.status.as_str())?,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
