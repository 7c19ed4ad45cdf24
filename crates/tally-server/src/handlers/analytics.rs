//! Dashboard and analytics handlers
//!
//! These are thin shims over the core aggregation reads: each request runs
//! the fixed query sequence as of the current instant and returns the
//! derived view. Storage failures abort the whole computation; no partial
//! dashboard is ever returned.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{AppError, AppState};
use tally_core::models::Dashboard;

/// GET /api/dashboard - The full aggregated dashboard view
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = state.db.dashboard(Utc::now())?;
    Ok(Json(dashboard))
}

/// GET /api/analytics/categories - Current-year category breakdown
pub async fn category_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let breakdown = state.db.category_breakdown(Utc::now())?;
    Ok(Json(
        serde_json::json!({ "category_breakdown": breakdown }),
    ))
}

/// GET /api/analytics/trends - Current-year spending by calendar month
pub async fn spending_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let trends = state.db.monthly_trends(Utc::now())?;
    Ok(Json(serde_json::json!({ "monthly_trends": trends })))
}
