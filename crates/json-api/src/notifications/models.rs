//! Notification response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::notifications::models::Notification;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,

    /// `order_status`, `payment` or `rating`
    pub kind: String,

    pub cart_item_uuid: Option<Uuid>,
    pub status: Option<String>,
    pub message: String,
    pub created_at: String,

    /// Absent while unread
    pub read_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            uuid: notification.uuid.into(),
            kind: notification.kind.to_string(),
            cart_item_uuid: notification.cart_item_uuid.map(Into::into),
            status: notification.status,
            message: notification.message,
            created_at: notification.created_at.to_string(),
            read_at: notification.read_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
}
