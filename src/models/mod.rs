//! # Data Models
//!
//! This module contains the data models used throughout the Notifications service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod notification;

pub use notification::Entity as Notification;

/// Static health check payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always "ok" while the process is serving requests
    #[schema(example = "ok")]
    pub status: String,
    /// The name of the service
    #[schema(example = "notifications-service")]
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            service: "notifications-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
