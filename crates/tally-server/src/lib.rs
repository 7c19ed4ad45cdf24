//! Tally Web Server
//!
//! Axum-based REST API for the tally subscription and expense tracker.
//! Exposes CRUD for the three collections plus the derived dashboard and
//! analytics views, with permissive CORS and request tracing. Static files
//! (the web UI build) can be served alongside the API.
//!
//! There is no authentication layer: the upstream service declared bearer
//! auth but never enforced it, and this server is meant to sit on localhost
//! or behind a reverse proxy that handles identity.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use tally_core::db::Database;

mod handlers;

/// Shared application state
pub struct AppState {
    pub db: Database,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>) -> Router {
    let state = Arc::new(AppState { db });

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        // Subscriptions (soft delete)
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        .route(
            "/subscriptions/:id",
            get(handlers::get_subscription)
                .put(handlers::update_subscription)
                .delete(handlers::delete_subscription),
        )
        // Expenses (hard delete)
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/expenses/:id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route(
            "/budgets/:id",
            put(handlers::update_budget).delete(handlers::delete_budget),
        )
        // Derived views
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analytics/categories", get(handlers::category_analytics))
        .route("/analytics/trends", get(handlers::spending_trends))
        .route("/export", get(handlers::export_data))
        .with_state(state);

    let mut app = Router::new().nest("/api", api_routes);

    // Serve the web UI build if a directory was provided, falling back to
    // index.html so client-side routing works
    if let Some(dir) = static_dir {
        let serve_dir = ServeDir::new(dir).append_index_html_on_directories(true);
        app = app.fallback_service(serve_dir);
        info!("Serving static files from {}", dir);
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    let app = create_router(db, static_dir);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<tally_core::Error> for AppError {
    fn from(err: tally_core::Error) -> Self {
        use tally_core::Error as CoreError;

        match err {
            CoreError::NotFound(msg) => Self::not_found(&msg),
            CoreError::InvalidData(msg) => Self::bad_request(&msg),
            // Storage failures surface as a sanitized server error; the
            // full cause goes to the log only
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}
