//! Apply Voucher Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    state::State,
    vouchers::{
        into_status_error,
        models::{ApplyVoucherRequest, VoucherPreviewResponse},
    },
};

/// Apply Voucher Handler
///
/// Checks whether a code could be redeemed now without redeeming it.
/// Ineligible and unknown codes answer `200` with `success: false`.
#[endpoint(
    tags("vouchers"),
    summary = "Preview Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Voucher preview"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    json: JsonBody<ApplyVoucherRequest>,
    depot: &mut Depot,
) -> Result<Json<VoucherPreviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let preview = state
        .app
        .vouchers
        .apply_voucher(&code.into_inner(), json.into_inner().subtotal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(preview.into()))
}
