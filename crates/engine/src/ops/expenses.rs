use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Expense, ExpenseCmd, ExpenseSummary, ResultEngine, expenses, expenses::validate_amount,
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Record an expense on a trip and recompute the trip total.
    pub async fn new_expense(&self, trip_id: Uuid, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        validate_amount(cmd.amount)?;
        let description = normalize_required_name(&cmd.description, "expense")?;
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let now = Utc::now();
            let expense = Expense {
                id: Uuid::new_v4(),
                trip_id,
                description,
                category: cmd.category,
                amount: cmd.amount,
                expense_date: cmd.expense_date,
                payment_method: cmd.payment_method,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                created_at: now,
                updated_at: now,
            };
            let model = expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            self.recalculate_in_tx(&db_tx, trip_id).await?;
            Expense::try_from(model)
        })
    }

    /// Return an expense.
    pub async fn expense(&self, expense_id: Uuid) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = self.require_expense(&db_tx, expense_id).await?;
            Expense::try_from(model)
        })
    }

    /// Return the expenses of a trip, most recent first.
    pub async fn expenses(&self, trip_id: Uuid) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            expenses::Entity::find()
                .filter(expenses::Column::TripId.eq(trip_id))
                .order_by_desc(expenses::Column::ExpenseDate)
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Replace every mutable field of an expense and recompute the trip total.
    pub async fn update_expense(&self, expense_id: Uuid, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        validate_amount(cmd.amount)?;
        let description = normalize_required_name(&cmd.description, "expense")?;
        with_tx!(self, |db_tx| {
            let current = Expense::try_from(self.require_expense(&db_tx, expense_id).await?)?;
            let updated = Expense {
                description,
                category: cmd.category,
                amount: cmd.amount,
                expense_date: cmd.expense_date,
                payment_method: cmd.payment_method,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                updated_at: Utc::now(),
                ..current
            };
            let model = expenses::ActiveModel::from(&updated).update(&db_tx).await?;
            self.recalculate_in_tx(&db_tx, updated.trip_id).await?;
            Expense::try_from(model)
        })
    }

    /// Delete an expense. Returns `false` if it does not exist.
    pub async fn delete_expense(&self, expense_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(expense) = expenses::Entity::find_by_id(expense_id).one(&db_tx).await? else {
                return Ok(false);
            };
            expenses::Entity::delete_by_id(expense_id)
                .exec(&db_tx)
                .await?;
            self.recalculate_in_tx(&db_tx, expense.trip_id).await?;
            Ok(true)
        })
    }

    /// Total spent per category for a trip, plus the grand total.
    pub async fn expense_summary(&self, trip_id: Uuid) -> ResultEngine<ExpenseSummary> {
        let expenses = self.expenses(trip_id).await?;
        ExpenseSummary::from_expenses(trip_id, &expenses)
    }
}
