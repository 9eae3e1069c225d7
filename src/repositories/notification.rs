//! # Notification Repository
//!
//! Tenant- and recipient-scoped data access for notifications. Every read,
//! update and count goes through [`recipient_scope`], a single conjunctive
//! filter on `tenant_id AND recipient_id`; a partial match never returns or
//! mutates a row.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use crate::auth::{TenantId, UserId};
use crate::error::RepositoryError;
use crate::models::notification::{
    ActiveModel as NotificationActiveModel, Column, Entity as Notification,
    Model as NotificationModel,
};

/// Client-supplied fields for a new notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: String,
}

/// Filter matching rows owned by `tenant` and addressed to `user`.
fn recipient_scope(tenant: &TenantId, user: &UserId) -> Condition {
    Condition::all()
        .add(Column::TenantId.eq(tenant.as_str()))
        .add(Column::RecipientId.eq(user.as_str()))
}

/// Repository for Notification database operations
pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new NotificationRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a notification owned by `tenant`.
    ///
    /// The tenant always comes from the identity context. `id`, `is_read`
    /// and `created_at` are assigned here; the stored row is returned from
    /// the insert statement itself.
    pub async fn create(
        &self,
        tenant: &TenantId,
        draft: NewNotification,
    ) -> Result<NotificationModel, RepositoryError> {
        let notification = NotificationActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant.as_str().to_owned()),
            recipient_id: Set(draft.recipient_id),
            title: Set(draft.title),
            message: Set(draft.message),
            notification_type: Set(draft.notification_type),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        };

        notification
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List every notification for `user` within `tenant`, oldest first.
    ///
    /// Returns an empty vector when nothing matches.
    pub async fn list_by_recipient(
        &self,
        tenant: &TenantId,
        user: &UserId,
    ) -> Result<Vec<NotificationModel>, RepositoryError> {
        Notification::find()
            .filter(recipient_scope(tenant, user))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Mark a notification read.
    ///
    /// Issued as one `UPDATE ... SET is_read = true WHERE id AND tenant AND
    /// recipient`, so concurrent callers cannot race between lookup and
    /// write. Rows that are already read still match, which makes the call
    /// idempotent. An unknown id and an id owned by another tenant or
    /// recipient both yield `NotFound`.
    pub async fn mark_read(
        &self,
        tenant: &TenantId,
        user: &UserId,
        notification_id: &str,
    ) -> Result<(), RepositoryError> {
        let id = Uuid::parse_str(notification_id)
            .map_err(|_| RepositoryError::validation_error("Invalid notification ID"))?;

        let result = Notification::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(recipient_scope(tenant, user).add(Column::Id.eq(id)))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Notification not found"));
        }

        Ok(())
    }

    /// Count unread notifications for `user` within `tenant`.
    pub async fn count_unread(
        &self,
        tenant: &TenantId,
        user: &UserId,
    ) -> Result<u64, RepositoryError> {
        Notification::find()
            .filter(recipient_scope(tenant, user).add(Column::IsRead.eq(false)))
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
