//! Update Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::payments::models::PaymentStatus;

use crate::{
    extensions::*,
    payments::{
        get::own_payment,
        into_status_error,
        models::{PaymentResponse, UpdatePaymentStatusRequest},
    },
    state::State,
};

/// Update Payment Status Handler
///
/// Moves a payment forward. Completed and cancelled payments are final.
#[endpoint(
    tags("payments"),
    summary = "Update Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or disallowed move"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    json: JsonBody<UpdatePaymentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let requested = json
        .into_inner()
        .status
        .parse::<PaymentStatus>()
        .or_400("Unknown payment status")?;

    let payment = own_payment(state, payment.into_inner().into(), user).await?;

    let updated = state
        .app
        .payments
        .update_payment_status(payment.uuid, requested)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::payments::{
        MockPaymentsService, PaymentsServiceError, models::PaymentUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        let mut app = mock_app();
        app.payments = Arc::new(payments);

        authenticated_service(
            app,
            Router::with_path("payments/{payment}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_success() -> TestResult {
        let uuid = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .return_once(move |_| Ok(make_payment(uuid, TEST_USER_UUID)));

        payments
            .expect_update_payment_status()
            .once()
            .withf(move |u, status| *u == uuid && *status == PaymentStatus::Processing)
            .return_once(move |_, status| {
                let mut payment = make_payment(uuid, TEST_USER_UUID);
                payment.status = status;

                Ok(payment)
            });

        let mut res = TestClient::put(format!("http://example.com/payments/{uuid}/status"))
            .json(&json!({ "status": "processing" }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_from_final_state_returns_400() {
        let uuid = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .return_once(move |_| Ok(make_payment(uuid, TEST_USER_UUID)));

        payments
            .expect_update_payment_status()
            .once()
            .return_once(|_, _| {
                Err(PaymentsServiceError::InvalidTransition {
                    from: PaymentStatus::Completed,
                    to: PaymentStatus::Pending,
                })
            });

        let res = TestClient::put(format!("http://example.com/payments/{uuid}/status"))
            .json(&json!({ "status": "pending" }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_update_status_unknown_status_returns_400() {
        let uuid = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments.expect_get_payment().never();

        let res = TestClient::put(format!("http://example.com/payments/{uuid}/status"))
            .json(&json!({ "status": "refunded" }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
