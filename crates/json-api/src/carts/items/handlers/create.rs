//! Create Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{
        into_status_error, items::models::AddCartItemRequest, models::CartItemResponse,
        owned_cart,
    },
    extensions::*,
    state::State,
};

/// Create Cart Item Handler
///
/// Adds a product to the cart, merging into an existing unpaid line for the
/// same product.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created or merged"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;

    let item = state
        .app
        .carts
        .add_item(json.into_inner().into_cart_item(cart.uuid))
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/carts/{}/items/{}", item.cart_uuid, item.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
