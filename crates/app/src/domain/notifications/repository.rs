//! Notifications Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_optional_timestamp, try_get_parsed, try_get_timestamp},
    domain::{
        carts::models::CartItemUuid,
        notifications::models::{NewNotification, Notification, NotificationKind, NotificationUuid},
        users::models::UserUuid,
    },
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const MARK_READ_SQL: &str = include_str!("sql/mark_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NewNotification,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.recipient_uuid.into_uuid())
            .bind(notification.kind.as_str())
            .bind(notification.cart_item_uuid.map(CartItemUuid::into_uuid))
            .bind(notification.status)
            .bind(notification.message)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipient: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        query_as::<Postgres, Notification>(LIST_NOTIFICATIONS_SQL)
            .bind(recipient.into_uuid())
            .bind(unread_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipient: UserUuid,
        notification: NotificationUuid,
    ) -> Result<Notification, sqlx::Error> {
        query_as::<Postgres, Notification>(MARK_READ_SQL)
            .bind(notification.into_uuid())
            .bind(recipient.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Notification {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            recipient_uuid: UserUuid::from_uuid(row.try_get("recipient_uuid")?),
            kind: try_get_parsed::<NotificationKind>(row, "kind")?,
            cart_item_uuid: row
                .try_get::<Option<Uuid>, _>("cart_item_uuid")?
                .map(CartItemUuid::from_uuid),
            status: row.try_get("status")?,
            message: row.try_get("message")?,
            created_at: try_get_timestamp(row, "created_at")?,
            read_at: try_get_optional_timestamp(row, "read_at")?,
        })
    }
}
