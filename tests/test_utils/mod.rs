//! Test utilities for database-backed notification tests.
//!
//! Provides in-memory SQLite databases with migrations applied and a router
//! wired against them.

use anyhow::Result;
use axum::{Router, body::Body, http::Request, response::Response};
use migration::{Migrator, MigratorTrait};
use notifications::{
    auth::{TenantId, UserId},
    models::notification,
    repositories::{NewNotification, NotificationRepository},
    server::{AppState, create_app},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::Value;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the application router over `db`.
#[allow(dead_code)]
pub fn test_app(db: DatabaseConnection) -> Router {
    create_app(AppState::new(db))
}

#[allow(dead_code)]
pub fn tenant(id: &str) -> TenantId {
    TenantId(id.to_string())
}

#[allow(dead_code)]
pub fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

/// Inserts a notification through the repository.
#[allow(dead_code)]
pub async fn insert_notification(
    db: &DatabaseConnection,
    tenant_id: &str,
    recipient_id: &str,
    title: &str,
) -> Result<notification::Model> {
    let created = NotificationRepository::new(db)
        .create(
            &tenant(tenant_id),
            NewNotification {
                recipient_id: recipient_id.to_string(),
                title: title.to_string(),
                message: format!("{} body", title),
                notification_type: "TEST".to_string(),
            },
        )
        .await?;
    Ok(created)
}

/// Inserts a row with an explicit id and creation time, bypassing the repository.
#[allow(dead_code)]
pub async fn insert_notification_at(
    db: &DatabaseConnection,
    id: uuid::Uuid,
    tenant_id: &str,
    recipient_id: &str,
    created_at: DateTime<Utc>,
) -> Result<notification::Model> {
    let row = notification::ActiveModel {
        id: Set(id),
        tenant_id: Set(tenant_id.to_string()),
        recipient_id: Set(recipient_id.to_string()),
        title: Set("Fixture".to_string()),
        message: Set("Fixture body".to_string()),
        notification_type: Set(String::new()),
        is_read: Set(false),
        created_at: Set(created_at.into()),
    };
    Ok(row.insert(db).await?)
}

/// Builds a request carrying the given identity headers and optional JSON body.
#[allow(dead_code)]
pub fn request(
    method: &str,
    uri: &str,
    tenant_id: Option<&str>,
    user_id: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant_id) = tenant_id {
        builder = builder.header("x-tenant-id", tenant_id);
    }
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Reads a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
