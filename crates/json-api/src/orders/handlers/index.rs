//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{
        into_status_error,
        models::{OrdersResponse, parse_status_filter},
    },
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's orders, optionally filtered by status.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.user_uuid_or_401()?;
    let status = parse_status_filter(status.into_inner())?;

    let orders = state
        .app
        .orders
        .list_orders(buyer, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::{
        carts::models::CartItemUuid,
        orders::{MockOrdersService, models::OrderStatus},
        users::models::UserUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        let mut app = mock_app();
        app.orders = Arc::new(orders);

        authenticated_service(app, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_filters_by_status() -> TestResult {
        let uuid = CartItemUuid::new();
        let shop = UserUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|buyer, status| {
                *buyer == TEST_USER_UUID && *status == Some(OrderStatus::ToReceive)
            })
            .return_once(move |_, _| {
                Ok(vec![make_order(
                    uuid,
                    TEST_USER_UUID,
                    shop,
                    OrderStatus::ToReceive,
                )])
            });

        let response: OrdersResponse =
            TestClient::get("http://example.com/orders?status=to_receive")
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(response.orders.len(), 1);
        assert_eq!(
            response.orders.first().map(|order| order.status.as_str()),
            Some("to_receive")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_filter_lists_everything() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, status| status.is_none())
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_index_unknown_status_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders?status=shipped")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
