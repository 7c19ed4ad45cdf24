//! Liveness endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::AppState;

/// GET /api/health - Report server and storage liveness
///
/// Pings storage with a trivial query; an unreachable database turns the
/// body unhealthy and the status 503.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let ping = state
        .db
        .conn()
        .and_then(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?));

    match ping {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "healthy", "db": "connected" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unhealthy",
                "db": "disconnected",
                "error": e.to_string(),
            })),
        ),
    }
}
