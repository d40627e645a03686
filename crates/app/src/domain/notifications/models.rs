//! Notification Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{carts::models::CartItemUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<Notification>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    OrderStatus,
    Payment,
    Rating,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderStatus => "order_status",
            Self::Payment => "payment",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(String);

impl FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order_status" => Ok(Self::OrderStatus),
            "payment" => Ok(Self::Payment),
            "rating" => Ok(Self::Rating),
            other => Err(ParseNotificationKindError(other.to_string())),
        }
    }
}

/// Notification Model
#[derive(Debug, Clone)]
pub struct Notification {
    pub uuid: NotificationUuid,
    pub recipient_uuid: UserUuid,
    pub kind: NotificationKind,
    pub cart_item_uuid: Option<CartItemUuid>,

    /// Status the event refers to, such as the new order status.
    pub status: Option<String>,

    pub message: String,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
}

/// New Notification Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub recipient_uuid: UserUuid,
    pub kind: NotificationKind,
    pub cart_item_uuid: Option<CartItemUuid>,
    pub status: Option<String>,
    pub message: String,
}

impl NewNotification {
    #[must_use]
    pub fn new(recipient: UserUuid, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            uuid: NotificationUuid::new(),
            recipient_uuid: recipient,
            kind,
            cart_item_uuid: None,
            status: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn for_item(mut self, item: CartItemUuid) -> Self {
        self.cart_item_uuid = Some(item);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
