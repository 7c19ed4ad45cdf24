//! Data export handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use tally_core::models::ExportSnapshot;

/// GET /api/export - JSON snapshot of every collection
///
/// Includes soft-deleted subscriptions so the export is a faithful copy of
/// storage, not of the active view.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExportSnapshot>, AppError> {
    let snapshot = state.db.export_all()?;
    Ok(Json(snapshot))
}
