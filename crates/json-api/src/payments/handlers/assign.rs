//! Assign Payment To Cart Items Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::owned_cart,
    extensions::*,
    payments::{get::own_payment, into_status_error, models::AssignedItemsResponse},
    state::State,
};

/// Assign Payment Handler
///
/// Stamps the payment onto paid items of the cart that carry no payment yet.
#[endpoint(
    tags("carts"),
    summary = "Assign Payment To Paid Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Items updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or payment not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AssignedItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;
    let payment = own_payment(state, payment.into_inner().into(), user).await?;

    let updated = state
        .app
        .payments
        .update_cart_items_with_payment(cart.uuid, payment.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AssignedItemsResponse { updated }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::{
        carts::{MockCartsService, models::CartUuid},
        payments::{MockPaymentsService, models::PaymentUuid},
    };
    use testresult::TestResult;

    use crate::{
        carts::tests::expect_own_cart,
        test_helpers::{TEST_USER_UUID, authenticated_service, mock_app},
    };

    use super::{super::tests::make_payment, *};

    #[tokio::test]
    async fn test_assign_reports_updated_items() -> TestResult {
        let cart = CartUuid::new();
        let payment = PaymentUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .return_once(move |_| Ok(make_payment(payment, TEST_USER_UUID)));

        payments
            .expect_update_cart_items_with_payment()
            .once()
            .withf(move |c, p| *c == cart && *p == payment)
            .return_once(|_, _| Ok(2));

        let mut app = mock_app();
        app.carts = Arc::new(carts);
        app.payments = Arc::new(payments);

        let service = authenticated_service(
            app,
            Router::with_path("carts/{cart}/payments/{payment}").put(handler),
        );

        let mut res = TestClient::put(format!(
            "http://example.com/carts/{cart}/payments/{payment}"
        ))
        .send(&service)
        .await;

        let body: AssignedItemsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.updated, 2);

        Ok(())
    }
}
