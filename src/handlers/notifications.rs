//! # Notifications API Handlers
//!
//! Create, list, mark-read and unread-count endpoints. Handlers only check
//! the identity context, validate input and map repository results; every
//! query scope is enforced by [`NotificationRepository`].

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::auth::{IdentityContext, IdentityHeaders};
use crate::error::{ApiError, validation_error};
use crate::models::notification::Model as NotificationModel;
use crate::repositories::{NewNotification, NotificationRepository};
use crate::server::AppState;

/// Request payload for creating a notification
///
/// Server-owned fields (`id`, `tenantId`, `isRead`, `createdAt`) are ignored
/// if a client sends them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// User the notification is addressed to
    #[schema(example = "user-42")]
    #[serde(default)]
    pub recipient_id: String,
    /// Short headline
    #[schema(example = "Task")]
    #[serde(default)]
    pub title: String,
    /// Body text
    #[schema(example = "Assigned to you")]
    #[serde(default)]
    pub message: String,
    /// Free-form classification tag
    #[schema(example = "TASK_ASSIGNED")]
    #[serde(default, rename = "type")]
    pub notification_type: String,
}

impl CreateNotificationRequest {
    /// Checks required fields, collecting one message per blank field.
    fn into_new_notification(self) -> Result<NewNotification, ApiError> {
        let mut field_errors = Map::new();
        for (field, value) in [
            ("recipientId", &self.recipient_id),
            ("title", &self.title),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                field_errors.insert(
                    field.to_string(),
                    Value::String(format!("{} is required", field)),
                );
            }
        }

        if !field_errors.is_empty() {
            return Err(validation_error("Invalid input", Value::Object(field_errors)));
        }

        Ok(NewNotification {
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
        })
    }
}

/// Notification as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Unique identifier (UUID)
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    #[schema(example = "user-42")]
    pub recipient_id: String,
    #[schema(example = "tenant-1")]
    pub tenant_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    #[schema(example = "TASK_ASSIGNED")]
    pub notification_type: String,
    pub is_read: bool,
    /// Creation timestamp (RFC 3339)
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub created_at: String,
}

impl From<NotificationModel> for NotificationResponse {
    fn from(model: NotificationModel) -> Self {
        Self {
            id: model.id.to_string(),
            recipient_id: model.recipient_id,
            tenant_id: model.tenant_id,
            title: model.title,
            message: model.message,
            notification_type: model.notification_type,
            is_read: model.is_read,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Confirmation body for state transitions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Notification marked as read")]
    pub message: String,
}

/// Unread counter body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    #[schema(example = 3)]
    pub unread_count: u64,
}

/// Create a notification for a recipient in the caller's tenant
#[utoipa::path(
    post,
    path = "/notifications",
    params(IdentityHeaders),
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Malformed or incomplete body", body = ApiError),
        (status = 401, description = "Missing tenant identity", body = ApiError),
        (status = 500, description = "Persistence failure", body = ApiError)
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    identity: IdentityContext,
    payload: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotificationResponse>), ApiError> {
    let tenant = identity.require_tenant()?;
    let Json(request) = payload?;
    let draft = request.into_new_notification()?;

    let created = NotificationRepository::new(&state.db)
        .create(&tenant, draft)
        .await?;

    counter!("notifications_created_total").increment(1);
    tracing::info!(
        tenant_id = %tenant,
        notification_id = %created.id,
        notification_type = %created.notification_type,
        "Notification created"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "/notifications",
    params(IdentityHeaders),
    responses(
        (status = 200, description = "Notifications for the caller, oldest first", body = [NotificationResponse]),
        (status = 401, description = "Missing tenant or user identity", body = ApiError),
        (status = 500, description = "Persistence failure", body = ApiError)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    identity: IdentityContext,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let (tenant, user) = identity.require_recipient()?;

    let notifications = NotificationRepository::new(&state.db)
        .list_by_recipient(&tenant, &user)
        .await?;

    tracing::debug!(tenant_id = %tenant, count = notifications.len(), "Listed notifications");

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Mark one of the caller's notifications as read
///
/// Repeating the call on an already-read notification succeeds.
#[utoipa::path(
    patch,
    path = "/notifications/{id}/read",
    params(
        ("id" = String, Path, description = "Notification UUID"),
        IdentityHeaders
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = MessageResponse),
        (status = 400, description = "Malformed notification ID", body = ApiError),
        (status = 401, description = "Missing tenant or user identity", body = ApiError),
        (status = 404, description = "No notification with this ID for the caller", body = ApiError),
        (status = 500, description = "Persistence failure", body = ApiError)
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    identity: IdentityContext,
    Path(notification_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (tenant, user) = identity.require_recipient()?;

    NotificationRepository::new(&state.db)
        .mark_read(&tenant, &user, &notification_id)
        .await?;

    counter!("notifications_marked_read_total").increment(1);
    tracing::info!(tenant_id = %tenant, notification_id = %notification_id, "Notification marked as read");

    Ok(Json(MessageResponse {
        message: "Notification marked as read".to_string(),
    }))
}

/// Count the caller's unread notifications
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    params(IdentityHeaders),
    responses(
        (status = 200, description = "Unread notification count", body = UnreadCountResponse),
        (status = 401, description = "Missing tenant or user identity", body = ApiError),
        (status = 500, description = "Persistence failure", body = ApiError)
    ),
    tag = "notifications"
)]
pub async fn unread_count(
    State(state): State<AppState>,
    identity: IdentityContext,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let (tenant, user) = identity.require_recipient()?;

    let unread_count = NotificationRepository::new(&state.db)
        .count_unread(&tenant, &user)
        .await?;

    Ok(Json(UnreadCountResponse { unread_count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(recipient: &str, title: &str, message: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            recipient_id: recipient.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            notification_type: String::new(),
        }
    }

    #[test]
    fn complete_request_converts() {
        let draft = request("U1", "Task", "Assigned to you")
            .into_new_notification()
            .unwrap();

        assert_eq!(draft.recipient_id, "U1");
        assert_eq!(draft.notification_type, "");
    }

    #[test]
    fn blank_fields_are_reported_together() {
        let err = request(" ", "", "body").into_new_notification().unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert!(details.get("recipientId").is_some());
        assert!(details.get("title").is_some());
        assert!(details.get("message").is_none());
    }

    #[test]
    fn body_tenant_is_not_part_of_the_request() {
        let parsed: CreateNotificationRequest = serde_json::from_value(serde_json::json!({
            "recipientId": "U1",
            "title": "Task",
            "message": "Assigned to you",
            "type": "TASK_ASSIGNED",
            "tenantId": "spoofed",
            "isRead": true
        }))
        .unwrap();

        assert_eq!(parsed.notification_type, "TASK_ASSIGNED");
        let echoed = serde_json::to_value(&parsed).unwrap();
        assert!(echoed.get("tenantId").is_none());
        assert!(echoed.get("isRead").is_none());
    }

    #[test]
    fn response_uses_camel_case_wire_names() {
        let model = NotificationModel {
            id: uuid::Uuid::nil(),
            tenant_id: "T1".to_string(),
            recipient_id: "U1".to_string(),
            title: "Task".to_string(),
            message: "Assigned to you".to_string(),
            notification_type: "TASK_ASSIGNED".to_string(),
            is_read: false,
            created_at: chrono::Utc::now().into(),
        };

        let json = serde_json::to_value(NotificationResponse::from(model)).unwrap();
        assert_eq!(json["tenantId"], "T1");
        assert_eq!(json["recipientId"], "U1");
        assert_eq!(json["type"], "TASK_ASSIGNED");
        assert_eq!(json["isRead"], false);
        assert!(json["createdAt"].is_string());
    }
}
