//! Cart item request bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    carts::models::{CartUuid, NewCartItem},
    users::models::UserUuid,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Id for the line if a new one is created
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Must be positive
    pub quantity: i64,
}

impl AddCartItemRequest {
    pub(crate) fn into_cart_item(self, cart: CartUuid) -> NewCartItem {
        NewCartItem {
            uuid: self.uuid.into(),
            product_uuid: self.product_uuid.into(),
            quantity: self.quantity,
            cart_uuid: Some(cart),
            user_uuid: None,
        }
    }

    pub(crate) fn into_user_item(self, user: UserUuid) -> NewCartItem {
        NewCartItem {
            uuid: self.uuid.into(),
            product_uuid: self.product_uuid.into(),
            quantity: self.quantity,
            cart_uuid: None,
            user_uuid: Some(user),
        }
    }
}

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// New quantity, zero or less removes the item
    pub quantity: i64,
}
