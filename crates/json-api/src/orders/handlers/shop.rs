//! Shop Order Index Handler

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

/// Shop Order Index Handler
///
/// Returns orders for products the caller sells.
#[endpoint(
    tags("orders"),
    summary = "List Shop Orders",
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
    let shop = depot.user_uuid_or_401()?;
    let status = parse_status_filter(status.into_inner())?;

    let orders = state
        .app
        .orders
        .list_shop_orders(shop, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
