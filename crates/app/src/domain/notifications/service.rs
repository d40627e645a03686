//! Notifications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        notifications::{
            errors::NotificationsServiceError,
            models::{NewNotification, Notification, NotificationUuid},
            repository::PgNotificationsRepository,
            sink::NotificationSink,
        },
        users::models::UserUuid,
    },
};

/// Persists notifications so recipients can fetch them over HTTP.
#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationSink for PgNotificationsService {
    async fn notify(&self, notification: NewNotification) -> Result<(), NotificationsServiceError> {
        if notification.message.trim().is_empty() {
            return Err(NotificationsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let recipient = notification.recipient_uuid;
        let kind = notification.kind;

        self.repository
            .create_notification(&mut tx, notification)
            .await?;

        tx.commit().await?;

        debug!(recipient_uuid = %recipient, kind = %kind, "stored notification");

        Ok(())
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        recipient: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notifications = self
            .repository
            .list_notifications(&mut tx, recipient, unread_only)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }

    #[tracing::instrument(
        name = "notifications.service.mark_read",
        skip(self),
        fields(recipient_uuid = %recipient, notification_uuid = %notification),
        err
    )]
    async fn mark_read(
        &self,
        recipient: UserUuid,
        notification: NotificationUuid,
    ) -> Result<Notification, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notification = self
            .repository
            .mark_read(&mut tx, recipient, notification)
            .await?;

        tx.commit().await?;

        Ok(notification)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Newest first. With `unread_only` set, read notifications are left out.
    async fn list_notifications(
        &self,
        recipient: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationsServiceError>;

    /// Mark one of the recipient's notifications as read. Marking twice keeps
    /// the first read time.
    async fn mark_read(
        &self,
        recipient: UserUuid,
        notification: NotificationUuid,
    ) -> Result<Notification, NotificationsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::notifications::models::NotificationKind, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn notify_then_list_and_mark_read() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Buyer").await;

        ctx.notifications
            .notify(NewNotification::new(user, NotificationKind::Payment, "first"))
            .await?;
        ctx.notifications
            .notify(NewNotification::new(user, NotificationKind::Payment, "second"))
            .await?;

        let all = ctx.notifications.list_notifications(user, false).await?;

        assert_eq!(all.len(), 2);

        let first = all.last().map(|n| n.uuid).ok_or("missing notification")?;
        let read = ctx.notifications.mark_read(user, first).await?;

        assert!(read.read_at.is_some());

        let unread = ctx.notifications.list_notifications(user, true).await?;

        assert_eq!(unread.len(), 1);
        assert_eq!(unread.first().map(|n| n.message.as_str()), Some("second"));

        Ok(())
    }

    #[tokio::test]
    async fn mark_read_for_other_recipient_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Buyer").await;
        let other = ctx.create_user("Other").await;

        ctx.notifications
            .notify(NewNotification::new(user, NotificationKind::Rating, "rated"))
            .await?;

        let notification = ctx
            .notifications
            .list_notifications(user, false)
            .await?
            .first()
            .map(|n| n.uuid)
            .ok_or("missing notification")?;

        let result = ctx.notifications.mark_read(other, notification).await;

        assert!(
            matches!(result, Err(NotificationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn notify_unknown_recipient_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .notifications
            .notify(NewNotification::new(
                UserUuid::new(),
                NotificationKind::Payment,
                "lost",
            ))
            .await;

        assert!(
            matches!(result, Err(NotificationsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
