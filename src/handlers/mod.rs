//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Notifications service.

pub mod notifications;

use crate::models::HealthStatus;
use axum::response::Json;

/// Health check returning a static status payload
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::default())
}
