//! Direct Payment Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::record_voucher_redemptions,
    payments::{
        into_status_error,
        models::{CreateDirectPaymentRequest, PaymentResponse},
    },
    state::State,
};

/// Direct Payment Handler
///
/// Buys a single product immediately without touching the rest of the cart.
#[endpoint(
    tags("payments"),
    summary = "Buy Now",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Voucher exhausted or payment exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDirectPaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let payment = state
        .app
        .payments
        .create_direct_payment(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_voucher_redemptions(payment.voucher_uuids.len());

    res.add_header(LOCATION, format!("/payments/{}", payment.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::{
        carts::models::CartItemUuid,
        payments::{MockPaymentsService, PaymentsServiceError, models::PaymentUuid},
        products::models::ProductUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        let mut app = mock_app();
        app.payments = Arc::new(payments);

        authenticated_service(app, Router::with_path("payments/direct").post(handler))
    }

    #[tokio::test]
    async fn test_direct_payment_success() -> TestResult {
        let uuid = PaymentUuid::new();
        let product = ProductUuid::new();

        let mut payments = MockPaymentsService::new();

        payments.expect_create_payment().never();

        payments
            .expect_create_direct_payment()
            .once()
            .withf(move |user, new| {
                *user == TEST_USER_UUID
                    && new.product_uuid == product
                    && new.quantity == 2
                    && new.voucher_codes.is_empty()
            })
            .return_once(move |user, _| Ok(make_payment(uuid, user)));

        let mut res = TestClient::post("http://example.com/payments/direct")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "cart_item_uuid": CartItemUuid::new().into_uuid(),
                "product_uuid": product.into_uuid(),
                "quantity": 2,
                "address": "1 Main Street",
                "delivery_fee": 300,
                "quoted_total": 1200,
            }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_direct_payment_unknown_product_returns_404() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_create_direct_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::post("http://example.com/payments/direct")
            .json(&json!({
                "uuid": PaymentUuid::new().into_uuid(),
                "cart_item_uuid": CartItemUuid::new().into_uuid(),
                "product_uuid": ProductUuid::new().into_uuid(),
                "quantity": 1,
                "address": "1 Main Street",
                "delivery_fee": 0,
                "quoted_total": 100,
            }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
