//! Expense management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{Expense, ExpensePatch, NewExpense};
use tally_core::ExpenseFilter;

/// Default page size when the client doesn't ask for one
const DEFAULT_EXPENSE_LIMIT: i64 = 100;

/// Query params for listing expenses
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Exact-match category filter
    pub category: Option<String>,
    /// Occurrence date lower bound (RFC 3339)
    pub start_date: Option<DateTime<Utc>>,
    /// Occurrence date upper bound (RFC 3339)
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// POST /api/expenses - Create an expense
///
/// The occurrence date defaults to the creation instant when omitted.
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = state.db.create_expense(&new)?;
    Ok(Json(expense))
}

/// GET /api/expenses - List expenses, newest occurrence first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let filter = ExpenseFilter::new()
        .category(query.category)
        .since(query.start_date)
        .until(query.end_date)
        .limit(Some(query.limit.unwrap_or(DEFAULT_EXPENSE_LIMIT)));

    let expenses = state.db.list_expenses(&filter)?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id - Fetch one expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .db
        .get_expense(&id)?
        .ok_or_else(|| AppError::not_found(&format!("Expense {} not found", id)))?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id - Merge a partial update
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ExpensePatch>,
) -> Result<Json<Expense>, AppError> {
    let expense = state.db.update_expense(&id, &patch)?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Hard-delete an expense
///
/// Removes the record entirely; a later fetch by this id is a 404. This is
/// deliberately asymmetric with the subscription soft delete.
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}
