//! Expenses: ad hoc cost items attached directly to a trip.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::impl_labels};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

impl_labels!(ExpenseCategory, "expense category", {
    Transportation => "transportation",
    Restaurant => "restaurant",
    Food => "food",
    Entertainment => "entertainment",
    Shopping => "shopping",
    Fee => "fee",
    Living => "living",
    Other => "other",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
}

impl_labels!(PaymentMethod, "payment method", {
    Cash => "cash",
    CreditCard => "credit_card",
});

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: MoneyCents,
    pub expense_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Total spent per category for one trip.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseSummary {
    pub trip_id: Uuid,
    /// Categories with at least one expense, in declaration order.
    pub by_category: Vec<(ExpenseCategory, MoneyCents)>,
    pub total: MoneyCents,
}

impl ExpenseSummary {
    pub(crate) fn from_expenses<'a>(
        trip_id: Uuid,
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> ResultEngine<Self> {
        let overflow =
            || EngineError::InvalidState(format!("expense total of trip {trip_id} overflows"));

        let mut totals = std::collections::BTreeMap::new();
        for expense in expenses {
            let entry = totals.entry(expense.category).or_insert(MoneyCents::ZERO);
            *entry = entry.checked_add(expense.amount).ok_or_else(overflow)?;
        }
        let total = MoneyCents::checked_sum(totals.values().copied()).ok_or_else(overflow)?;
        Ok(Self {
            trip_id,
            by_category: totals.into_iter().collect(),
            total,
        })
    }
}

pub(crate) fn validate_amount(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidArgument(
            "expense amount must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trip_id: Uuid,
    pub description: String,
    pub category: String,
    pub amount_minor: i64,
    pub expense_date: Date,
    pub payment_method: String,
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
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            trip_id: ActiveValue::Set(value.trip_id),
            description: ActiveValue::Set(value.description.clone()),
            category: ActiveValue::Set(value.category.as_str().to_string()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            expense_date: ActiveValue::Set(value.expense_date),
            payment_method: ActiveValue::Set(value.payment_method.as_str().to_string()),
            notes: ActiveValue::Set(value.notes.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            trip_id: model.trip_id,
            description: model.description,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount: MoneyCents::new(model.amount_minor),
            expense_date: model.expense_date,
            payment_method: PaymentMethod::try_from(model.payment_method.as_str())?,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
