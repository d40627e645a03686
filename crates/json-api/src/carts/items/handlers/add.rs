//! Add To User Cart Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{into_status_error, items::models::AddCartItemRequest, models::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add To User Cart Handler
///
/// Adds a product to the caller's own cart, creating the cart on first use.
#[endpoint(
    tags("carts"),
    summary = "Add Item to My Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created or merged"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(json.into_inner().into_user_item(user))
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
