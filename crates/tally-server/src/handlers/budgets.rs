//! Budget management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{Budget, BudgetPatch, NewBudget};

/// POST /api/budgets - Create a budget
///
/// Several budgets may share a period/category pair; the alerting pass
/// evaluates each one independently.
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewBudget>,
) -> Result<Json<Budget>, AppError> {
    let budget = state.db.create_budget(&new)?;
    Ok(Json(budget))
}

/// GET /api/budgets - List all budgets
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let budgets = state.db.list_budgets()?;
    Ok(Json(budgets))
}

/// PUT /api/budgets/:id - Merge a partial update
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<BudgetPatch>,
) -> Result<Json<Budget>, AppError> {
    let budget = state.db.update_budget(&id, &patch)?;
    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_budget(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}
