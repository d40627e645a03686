//! Get Payment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::{
    payments::models::{Payment, PaymentUuid},
    users::models::UserUuid,
};

use crate::{
    extensions::*,
    payments::{into_status_error, models::PaymentResponse},
    state::State,
};

/// Load a payment made by `user`. Other users' payments are reported as
/// missing.
pub(crate) async fn own_payment(
    state: &State,
    payment: PaymentUuid,
    user: UserUuid,
) -> Result<Payment, StatusError> {
    let payment = state
        .app
        .payments
        .get_payment(payment)
        .await
        .map_err(into_status_error)?;

    if payment.user_uuid != user {
        return Err(StatusError::not_found().brief("Payment not found"));
    }

    Ok(payment)
}

/// Get Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let payment = own_payment(state, payment.into_inner().into(), user).await?;

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use storefront_app::domain::payments::MockPaymentsService;

    use crate::test_helpers::{TEST_USER_UUID, authenticated_service, mock_app};

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        let mut app = mock_app();
        app.payments = Arc::new(payments);

        authenticated_service(app, Router::with_path("payments/{payment}").get(handler))
    }

    #[tokio::test]
    async fn test_get_own_payment() {
        let uuid = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_payment(uuid, TEST_USER_UUID)));

        let res = TestClient::get(format!("http://example.com/payments/{uuid}"))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_get_other_users_payment_returns_404() {
        let uuid = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .return_once(move |_| Ok(make_payment(uuid, UserUuid::new())));

        let res = TestClient::get(format!("http://example.com/payments/{uuid}"))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
