//! Voucher Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    vouchers::{into_status_error, models::VouchersResponse},
};

/// Voucher Index Handler
#[endpoint(
    tags("vouchers"),
    summary = "List Vouchers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VouchersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vouchers = state
        .app
        .vouchers
        .list_vouchers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(VouchersResponse {
        vouchers: vouchers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::vouchers::{MockVouchersService, models::VoucherKind};
    use testresult::TestResult;

    use crate::test_helpers::{authenticated_service, mock_app};

    use super::{super::tests::make_voucher, *};

    #[tokio::test]
    async fn test_index_lists_vouchers() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_list_vouchers().once().return_once(|| {
            Ok(vec![
                make_voucher("FREESHIP", VoucherKind::FreeShipping),
                make_voucher("SPRING", VoucherKind::Percentage { percent: 10 }),
            ])
        });

        let mut app = mock_app();
        app.vouchers = Arc::new(vouchers);

        let service = authenticated_service(app, Router::with_path("vouchers").get(handler));

        let response: VouchersResponse = TestClient::get("http://example.com/vouchers")
            .send(&service)
            .await
            .take_json()
            .await?;

        let kinds: Vec<_> = response
            .vouchers
            .iter()
            .map(|voucher| (voucher.kind.as_str(), voucher.percent))
            .collect();

        assert_eq!(kinds, vec![("free_shipping", None), ("percentage", Some(10))]);

        Ok(())
    }
}
