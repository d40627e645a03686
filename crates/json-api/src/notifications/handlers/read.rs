//! Mark Notification Read Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    notifications::{into_status_error, models::NotificationResponse},
    state::State,
};

/// Mark Notification Read Handler
///
/// Marking an already read notification keeps its first read time.
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notification marked read"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
    ),
)]
pub(crate) async fn handler(
    notification: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let notification = state
        .app
        .notifications
        .mark_read(user, notification.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(notification.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::notifications::{
        MockNotificationsService, NotificationsServiceError, models::NotificationUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_notification, *};

    fn make_service(notifications: MockNotificationsService) -> Service {
        let mut app = mock_app();
        app.notifications = Arc::new(notifications);

        authenticated_service(
            app,
            Router::with_path("notifications/{notification}/read").put(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_read_returns_read_notification() -> TestResult {
        let uuid = NotificationUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .withf(move |recipient, n| *recipient == TEST_USER_UUID && *n == uuid)
            .return_once(move |_, _| Ok(make_notification(uuid, Some(Timestamp::UNIX_EPOCH))));

        let mut res = TestClient::put(format!("http://example.com/notifications/{uuid}/read"))
            .send(&make_service(notifications))
            .await;

        let body: NotificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.read_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_read_of_other_users_notification_returns_404() {
        let uuid = NotificationUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .return_once(|_, _| Err(NotificationsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/notifications/{uuid}/read"))
            .send(&make_service(notifications))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
