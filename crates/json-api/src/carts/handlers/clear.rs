//! Clear Unpaid Items Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{into_status_error, models::ClearedItemsResponse, owned_cart},
    extensions::*,
    state::State,
};

/// Clear Unpaid Items Handler
///
/// Permanently removes every unpaid item. Paid items stay in the cart.
#[endpoint(
    tags("carts"),
    summary = "Clear Unpaid Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Unpaid items removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ClearedItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;

    let removed = state
        .app
        .carts
        .clear_unpaid_items(cart.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClearedItemsResponse { removed }))
}
