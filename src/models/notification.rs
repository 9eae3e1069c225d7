//! Notification entity model
//!
//! This module contains the SeaORM entity model for the notifications table.
//! A notification belongs to exactly one tenant and one recipient; `is_read`
//! is the only column that changes after insert.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Notification addressed to a single recipient within a tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier generated at creation (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tenant, taken from the caller's identity context
    pub tenant_id: String,

    /// User the notification is addressed to
    pub recipient_id: String,

    /// Short headline
    pub title: String,

    /// Body text
    pub message: String,

    /// Free-form classification tag (e.g. INFO, WARNING, TASK_ASSIGNED)
    pub notification_type: String,

    /// Read flag; only ever transitions false -> true
    pub is_read: bool,

    /// Timestamp when the notification was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
