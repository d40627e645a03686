//! Notification Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    notifications::{into_status_error, models::NotificationsResponse},
    state::State,
};

/// Notification Index Handler
///
/// Returns the caller's notifications, newest first.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    unread_only: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(user, unread_only.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::notifications::{
        MockNotificationsService, models::NotificationUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_notification, *};

    fn make_service(notifications: MockNotificationsService) -> Service {
        let mut app = mock_app();
        app.notifications = Arc::new(notifications);

        authenticated_service(app, Router::with_path("notifications").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_all_notifications() -> TestResult {
        let uuid = NotificationUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_list_notifications()
            .once()
            .withf(|recipient, unread_only| *recipient == TEST_USER_UUID && !*unread_only)
            .return_once(move |_, _| Ok(vec![make_notification(uuid, None)]));

        let response: NotificationsResponse = TestClient::get("http://example.com/notifications")
            .send(&make_service(notifications))
            .await
            .take_json()
            .await?;

        assert_eq!(response.notifications.len(), 1);
        assert_eq!(
            response.notifications.first().map(|n| n.kind.as_str()),
            Some("order_status")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_unread_only() {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_list_notifications()
            .once()
            .withf(|_, unread_only| *unread_only)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/notifications?unread_only=true")
            .send(&make_service(notifications))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }
}
