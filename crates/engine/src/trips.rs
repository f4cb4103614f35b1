//! The module contains the `Trip` aggregate root.
//!
//! A trip owns its ordered trip points and its expenses. `total_cost` is a
//! derived field: it is written only by the cost aggregator
//! (`Engine::recalculate_trip_total_cost`) and never accepted as input.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, MoneyCents, ResultEngine};

/// A planned or completed journey.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_completed: bool,
    /// At most one trip is default at any time.
    pub is_default: bool,
    pub description: Option<String>,
    /// Budget set by the user; independent of `total_cost`.
    pub planned_cost: Option<MoneyCents>,
    pub total_cost: MoneyCents,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(name: String, start_date: NaiveDate, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            start_date,
            end_date: None,
            is_completed: false,
            is_default: false,
            description: None,
            planned_cost: None,
            total_cost: MoneyCents::ZERO,
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Remaining budget (`planned - total`), if a budget was set and the
    /// difference fits in an `i64`.
    #[must_use]
    pub fn remaining_budget(&self) -> Option<MoneyCents> {
        self.planned_cost
            .and_then(|planned| planned.checked_sub(self.total_cost))
    }
}

pub(crate) fn validate_budget(planned_cost: Option<MoneyCents>) -> ResultEngine<()> {
    if planned_cost.is_some_and(MoneyCents::is_negative) {
        return Err(EngineError::InvalidArgument(
            "planned cost must be >= 0".to_string(),
        ));
    }
    Ok(())
}

/// A trip with its ordered trip points and its expenses (newest first).
#[derive(Clone, Debug, PartialEq)]
pub struct TripDetail {
    pub trip: Trip,
    pub points: Vec<crate::TripPoint>,
    pub expenses: Vec<crate::Expense>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub is_completed: bool,
    pub is_default: bool,
    pub description: Option<String>,
    pub planned_cost_minor: Option<i64>,
    pub total_cost_minor: i64,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trip_points::Entity")]
    TripPoints,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::trip_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripPoints.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Trip> for ActiveModel {
    fn from(value: &Trip) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name.clone()),
            start_date: ActiveValue::Set(value.start_date),
            end_date: ActiveValue::Set(value.end_date),
            is_completed: ActiveValue::Set(value.is_completed),
            is_default: ActiveValue::Set(value.is_default),
            description: ActiveValue::Set(value.description.clone()),
            planned_cost_minor: ActiveValue::Set(value.planned_cost.map(MoneyCents::cents)),
            total_cost_minor: ActiveValue::Set(value.total_cost.cents()),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl TryFrom<Model> for Trip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            is_completed: model.is_completed,
            is_default: model.is_default,
            description: model.description,
            planned_cost: model.planned_cost_minor.map(MoneyCents::new),
            total_cost: MoneyCents::new(model.total_cost_minor),
            currency: Currency::try_from(model.currency.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> Trip {
        Trip::new(
            "Italy".to_string(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Currency::Eur,
        )
    }

    #[test]
    fn new_trip_starts_empty() {
        let trip = trip();
        assert_eq!(trip.total_cost, MoneyCents::ZERO);
        assert!(!trip.is_default);
        assert!(!trip.is_completed);
        assert_eq!(trip.remaining_budget(), None);
    }

    #[test]
    fn remaining_budget_subtracts_total() {
        let mut trip = trip();
        trip.planned_cost = Some(MoneyCents::new(50_000));
        trip.total_cost = MoneyCents::new(20_000);
        assert_eq!(trip.remaining_budget(), Some(MoneyCents::new(30_000)));
    }

    #[test]
    fn remaining_budget_does_not_wrap() {
        let mut trip = trip();
        trip.planned_cost = Some(MoneyCents::new(i64::MIN));
        trip.total_cost = MoneyCents::new(100);
        assert_eq!(trip.remaining_budget(), None);
    }

    #[test]
    fn negative_budget_is_rejected() {
        assert!(validate_budget(None).is_ok());
        assert!(validate_budget(Some(MoneyCents::ZERO)).is_ok());
        assert!(validate_budget(Some(MoneyCents::new(-1))).is_err());
    }

    #[test]
    fn model_round_trip_keeps_currency() {
        let mut trip = trip();
        trip.currency = Currency::Usd;
        let model = Model {
            id: trip.id,
            name: trip.name.clone(),
            start_date: trip.start_date,
            end_date: None,
            is_completed: false,
            is_default: true,
            description: None,
            planned_cost_minor: None,
            total_cost_minor: 0,
            currency: "USD".to_string(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        };
        let back = Trip::try_from(model).unwrap();
        assert_eq!(back.currency, Currency::Usd);
        assert!(back.is_default);
    }

    #[test]
    fn model_with_unknown_currency_is_rejected() {
        let trip = trip();
        let mut model = Model {
            id: trip.id,
            name: trip.name,
            start_date: trip.start_date,
            end_date: None,
            is_completed: false,
            is_default: false,
            description: None,
            planned_cost_minor: None,
            total_cost_minor: 0,
            currency: "EUR".to_string(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        };
        model.currency = "ZZZ".to_string();
        assert!(Trip::try_from(model).is_err());
    }
}
