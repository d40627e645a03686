//! Create Voucher Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    vouchers::{
        into_status_error,
        models::{CreateVoucherRequest, VoucherResponse},
    },
};

/// Create Voucher Handler
#[endpoint(
    tags("vouchers"),
    summary = "Create Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher created"),
        (status_code = StatusCode::CONFLICT, description = "Voucher code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let voucher = json.into_inner().into_new_voucher()?;

    let voucher = state
        .app
        .vouchers
        .create_voucher(voucher)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/vouchers/{}", voucher.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(voucher.into()))
}
