//! Create Payment Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::record_voucher_redemptions,
    payments::{
        into_status_error,
        models::{CreatePaymentRequest, PaymentResponse},
    },
    state::State,
};

/// Create Payment Handler
///
/// Checks out unpaid cart items. The quoted total must match the total
/// recomputed from current prices and vouchers.
#[endpoint(
    tags("payments"),
    summary = "Check Out Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Voucher exhausted or payment exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("cart_uuid", tracing::field::display(request.cart_uuid));

    let payment = state
        .app
        .payments
        .create_payment(user, request.into())
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
        carts::models::{CartItemUuid, CartUuid},
        payments::{MockPaymentsService, PaymentsServiceError, models::PaymentUuid},
        vouchers::models::VoucherUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        let mut app = mock_app();
        app.payments = Arc::new(payments);

        authenticated_service(app, Router::with_path("payments").post(handler))
    }

    fn request_body(uuid: PaymentUuid, cart: CartUuid, item: CartItemUuid) -> serde_json::Value {
        json!({
            "uuid": uuid.into_uuid(),
            "cart_uuid": cart.into_uuid(),
            "items": [item.into_uuid()],
            "address": "1 Main Street",
            "delivery_fee": 300,
            "voucher_codes": ["SPRING"],
            "quoted_total": 1200,
        })
    }

    #[tokio::test]
    async fn test_create_payment_success() -> TestResult {
        let uuid = PaymentUuid::new();
        let cart = CartUuid::new();
        let item = CartItemUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_create_payment()
            .once()
            .withf(move |user, new| {
                *user == TEST_USER_UUID
                    && new.uuid == uuid
                    && new.cart_uuid == cart
                    && new.items == vec![item]
                    && new.voucher_codes.as_slice() == ["SPRING".to_string()]
                    && new.quoted_total == 1_200
            })
            .return_once(move |user, _| {
                let mut payment = make_payment(uuid, user);
                payment.voucher_uuids = vec![VoucherUuid::new()];

                Ok(payment)
            });

        let mut res = TestClient::post("http://example.com/payments")
            .json(&request_body(uuid, cart, item))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/payments/{uuid}").as_str()));
        assert_eq!(body.total, 1_200);
        assert_eq!(body.voucher_uuids.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_payment_total_mismatch_returns_400() {
        let mut payments = MockPaymentsService::new();

        payments.expect_create_payment().once().return_once(|_, _| {
            Err(PaymentsServiceError::TotalMismatch {
                quoted: 1_200,
                computed: 1_300,
            })
        });

        let res = TestClient::post("http://example.com/payments")
            .json(&request_body(
                PaymentUuid::new(),
                CartUuid::new(),
                CartItemUuid::new(),
            ))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_payment_exhausted_voucher_returns_409() {
        let mut payments = MockPaymentsService::new();

        payments.expect_create_payment().once().return_once(|_, _| {
            Err(PaymentsServiceError::VoucherExhausted {
                code: "SPRING".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/payments")
            .json(&request_body(
                PaymentUuid::new(),
                CartUuid::new(),
                CartItemUuid::new(),
            ))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_create_payment_for_other_users_cart_returns_404() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_create_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::post("http://example.com/payments")
            .json(&request_body(
                PaymentUuid::new(),
                CartUuid::new(),
                CartItemUuid::new(),
            ))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
