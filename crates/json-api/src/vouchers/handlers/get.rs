//! Get Voucher Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    vouchers::{into_status_error, models::VoucherResponse},
};

/// Get Voucher Handler
///
/// Looks a voucher up by its code.
#[endpoint(
    tags("vouchers"),
    summary = "Get Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Voucher"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let voucher = state
        .app
        .vouchers
        .get_voucher(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(voucher.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::vouchers::{
        MockVouchersService, VouchersServiceError, models::VoucherKind,
    };
    use testresult::TestResult;

    use crate::test_helpers::{authenticated_service, mock_app};

    use super::{super::tests::make_voucher, *};

    fn make_service(vouchers: MockVouchersService) -> Service {
        let mut app = mock_app();
        app.vouchers = Arc::new(vouchers);

        authenticated_service(app, Router::with_path("vouchers/{code}").get(handler))
    }

    #[tokio::test]
    async fn test_get_voucher_by_code() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_get_voucher()
            .once()
            .withf(|code| code == "FREESHIP")
            .return_once(|code| Ok(make_voucher(code, VoucherKind::FreeShipping)));

        let mut res = TestClient::get("http://example.com/vouchers/FREESHIP")
            .send(&make_service(vouchers))
            .await;

        let body: VoucherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.code, "FREESHIP");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_code_returns_404() {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_get_voucher()
            .once()
            .return_once(|_| Err(VouchersServiceError::NotFound));

        let res = TestClient::get("http://example.com/vouchers/NOPE")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
