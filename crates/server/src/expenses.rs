//! Expense endpoints.

use api_types::expense::{ExpenseInput, ExpenseSummaryResponse, ExpenseView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    convert::{expense_cmd, expense_summary_response, expense_view},
    server::ServerState,
    trips::deleted_status,
};

pub async fn list(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.expenses(trip_id).await?;
    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<ExpenseInput>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state
        .engine
        .new_expense(trip_id, expense_cmd(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}

pub async fn summary(
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ExpenseSummaryResponse>, ServerError> {
    let summary = state.engine.expense_summary(trip_id).await?;
    Ok(Json(expense_summary_response(summary)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(expense_id).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<ExpenseInput>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .update_expense(expense_id, expense_cmd(payload))
        .await?;
    Ok(Json(expense_view(expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let deleted = state.engine.delete_expense(expense_id).await?;
    Ok(deleted_status(deleted))
}
