//! Notification delivery boundary.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::domain::notifications::{errors::NotificationsServiceError, models::NewNotification};

/// Delivers a notification to its recipient.
#[automock]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: NewNotification) -> Result<(), NotificationsServiceError>;
}

/// Dispatches notifications after the triggering change has been committed.
/// Delivery failures are logged and never reach the caller.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub async fn dispatch<I>(&self, notifications: I)
    where
        I: IntoIterator<Item = NewNotification> + Send,
        I::IntoIter: Send,
    {
        for notification in notifications {
            let recipient = notification.recipient_uuid;
            let kind = notification.kind;

            if let Err(error) = self.sink.notify(notification).await {
                warn!(
                    recipient_uuid = %recipient,
                    kind = %kind,
                    error = %error,
                    "failed to deliver notification"
                );
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use crate::domain::{notifications::models::NotificationKind, users::models::UserUuid};

    use super::*;

    #[tokio::test]
    async fn dispatch_continues_after_failed_delivery() {
        let mut sink = MockNotificationSink::new();
        let mut seq = Sequence::new();
        let buyer = UserUuid::new();
        let shop = UserUuid::new();

        sink.expect_notify()
            .once()
            .in_sequence(&mut seq)
            .withf(move |n| n.recipient_uuid == buyer)
            .returning(|_| Err(NotificationsServiceError::InvalidReference));

        sink.expect_notify()
            .once()
            .in_sequence(&mut seq)
            .withf(move |n| n.recipient_uuid == shop)
            .returning(|_| Ok(()));

        let notifier = Notifier::new(Arc::new(sink));

        notifier
            .dispatch([
                NewNotification::new(buyer, NotificationKind::OrderStatus, "shipped"),
                NewNotification::new(shop, NotificationKind::OrderStatus, "shipped"),
            ])
            .await;
    }

    #[tokio::test]
    async fn dispatch_of_nothing_never_calls_sink() {
        let mut sink = MockNotificationSink::new();

        sink.expect_notify().never();

        Notifier::new(Arc::new(sink)).dispatch(Vec::new()).await;
    }
}
