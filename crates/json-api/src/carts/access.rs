//! Cart ownership checks.

use salvo::http::StatusError;

use storefront_app::domain::{
    carts::models::{Cart, CartUuid},
    users::models::UserUuid,
};

use crate::{carts::into_status_error, state::State};

/// Load a cart the caller may act on. Anonymous carts are open to any
/// authenticated user; another user's cart is reported as missing.
pub(crate) async fn owned_cart(
    state: &State,
    cart: CartUuid,
    user: UserUuid,
) -> Result<Cart, StatusError> {
    let cart = state
        .app
        .carts
        .get_cart(cart)
        .await
        .map_err(into_status_error)?;

    ensure_visible(cart, user)
}

pub(crate) fn ensure_visible(cart: Cart, user: UserUuid) -> Result<Cart, StatusError> {
    match cart.user_uuid {
        Some(owner) if owner != user => Err(StatusError::not_found().brief("Cart or item not found")),
        _ => Ok(cart),
    }
}
