//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderStatus;

use crate::{
    extensions::*,
    observability::record_order_transition,
    orders::{
        into_status_error,
        models::{UpdateOrderStatusRequest, UpdateOrderStatusResponse, is_party, may_request},
    },
    state::State,
};

/// Update Order Status Handler
///
/// Requests a status change. The buyer may complete or cancel as buyer, the
/// shop may ship or cancel as seller. Moves the transition table does not
/// allow are answered with `success: false` and the unchanged order.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transition applied or rejected"),
        (status_code = StatusCode::FORBIDDEN, description = "Status not requestable by this party"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, requested = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateOrderStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();
    let order = order.into_inner();

    let requested = request
        .status
        .parse::<OrderStatus>()
        .or_400("Unknown order status")?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("requested", requested.as_str());

    let current = state
        .app
        .orders
        .get_order(order.into())
        .await
        .map_err(into_status_error)?;

    if !is_party(&current, user) {
        return Err(StatusError::not_found().brief("Order not found"));
    }

    if !may_request(&current, user, requested) {
        return Err(StatusError::forbidden().brief("Status not requestable by this party"));
    }

    let outcome = state
        .app
        .orders
        .transition(current.uuid, requested, request.cancel_reason)
        .await
        .map_err(into_status_error)?;

    record_order_transition(requested.as_str(), outcome.success);

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::{
        carts::models::CartItemUuid,
        orders::{MockOrdersService, models::TransitionOutcome},
        users::models::UserUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        let mut app = mock_app();
        app.orders = Arc::new(orders);

        authenticated_service(app, Router::with_path("orders/{order}/status").put(handler))
    }

    #[tokio::test]
    async fn test_buyer_cancel_is_forwarded_with_reason() -> TestResult {
        let uuid = CartItemUuid::new();
        let shop = UserUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| {
            Ok(make_order(uuid, TEST_USER_UUID, shop, OrderStatus::ToOrder))
        });

        orders
            .expect_transition()
            .once()
            .withf(move |u, requested, reason| {
                *u == uuid
                    && *requested == OrderStatus::CancelByUser
                    && reason.as_deref() == Some("changed my mind")
            })
            .return_once(move |_, _, reason| {
                let mut order = make_order(uuid, TEST_USER_UUID, shop, OrderStatus::CancelByUser);
                order.cancel_reason = reason;

                Ok(TransitionOutcome {
                    success: true,
                    message: "order cancelled".to_string(),
                    order,
                })
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "cancel_by_user", "cancel_reason": "changed my mind" }))
            .send(&make_service(orders))
            .await;

        let body: UpdateOrderStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.order.status, "cancel_by_user");
        assert_eq!(body.order.cancel_reason.as_deref(), Some("changed my mind"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_transition_returns_unchanged_order() -> TestResult {
        let uuid = CartItemUuid::new();
        let buyer = UserUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| {
            Ok(make_order(uuid, buyer, TEST_USER_UUID, OrderStatus::Complete))
        });

        orders.expect_transition().once().return_once(move |_, _, _| {
            Ok(TransitionOutcome {
                success: false,
                message: "cannot move from complete to to_receive".to_string(),
                order: make_order(uuid, buyer, TEST_USER_UUID, OrderStatus::Complete),
            })
        });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "to_receive" }))
            .send(&make_service(orders))
            .await;

        let body: UpdateOrderStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.success);
        assert_eq!(body.order.status, "complete");

        Ok(())
    }

    #[tokio::test]
    async fn test_buyer_cannot_mark_own_order_shipped() {
        let uuid = CartItemUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| {
            Ok(make_order(uuid, TEST_USER_UUID, UserUuid::new(), OrderStatus::ToOrder))
        });

        orders.expect_transition().never();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "to_receive" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_shop_cannot_cancel_on_behalf_of_buyer() {
        let uuid = CartItemUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| {
            Ok(make_order(uuid, UserUuid::new(), TEST_USER_UUID, OrderStatus::ToOrder))
        });

        orders.expect_transition().never();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "cancel_by_user" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() {
        let uuid = CartItemUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();
        orders.expect_transition().never();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "lost" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_unrelated_user_cannot_transition() {
        let uuid = CartItemUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| {
            Ok(make_order(
                uuid,
                UserUuid::new(),
                UserUuid::new(),
                OrderStatus::ToOrder,
            ))
        });

        orders.expect_transition().never();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "to_receive" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
