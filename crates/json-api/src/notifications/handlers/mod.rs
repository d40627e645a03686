//! Notification Handlers

pub(crate) mod index;
pub(crate) mod read;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::notifications::models::{
        Notification, NotificationKind, NotificationUuid,
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(crate) fn make_notification(uuid: NotificationUuid, read_at: Option<Timestamp>) -> Notification {
        Notification {
            uuid,
            recipient_uuid: TEST_USER_UUID,
            kind: NotificationKind::OrderStatus,
            cart_item_uuid: None,
            status: Some("to_receive".to_string()),
            message: "Your order is on its way".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            read_at,
        }
    }
}
