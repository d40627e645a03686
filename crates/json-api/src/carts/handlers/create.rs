//! Get Or Create Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        access::ensure_visible,
        into_status_error,
        models::{CartResponse, GetOrCreateCartRequest},
    },
    extensions::*,
    state::State,
};

/// Get Or Create Cart Handler
///
/// Loads the requested cart, creating an empty one when the id is absent or
/// unknown.
#[endpoint(
    tags("carts"),
    summary = "Get Or Create Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart belongs to another user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<GetOrCreateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_cart(json.into_inner().cart_uuid.map(Into::into))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ensure_visible(cart, user)?.into()))
}
