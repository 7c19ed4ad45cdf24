//! Subscription management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{NewSubscription, Subscription, SubscriptionPatch};

/// POST /api/subscriptions - Create a subscription
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewSubscription>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state.db.create_subscription(&new)?;
    Ok(Json(subscription))
}

/// GET /api/subscriptions - List active subscriptions
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = state.db.list_active_subscriptions()?;
    Ok(Json(subscriptions))
}

/// GET /api/subscriptions/:id - Fetch one subscription, inactive included
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state
        .db
        .get_subscription(&id)?
        .ok_or_else(|| AppError::not_found(&format!("Subscription {} not found", id)))?;
    Ok(Json(subscription))
}

/// PUT /api/subscriptions/:id - Merge a partial update
///
/// Only the provided fields change; `updated_at` is always refreshed.
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SubscriptionPatch>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state.db.update_subscription(&id, &patch)?;
    Ok(Json(subscription))
}

/// DELETE /api/subscriptions/:id - Soft-delete a subscription
///
/// Clears the active flag and keeps the record; it remains fetchable by id
/// but disappears from the active list and all projections.
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.deactivate_subscription(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}
