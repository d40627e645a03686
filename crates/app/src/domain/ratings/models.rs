//! Rating Models

use jiff::Timestamp;

use crate::{
    domain::{carts::models::CartItemUuid, products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Rating UUID
pub type RatingUuid = TypedUuid<Rating>;

/// Rating Model, at most one per purchased cart item.
#[derive(Debug, Clone)]
pub struct Rating {
    pub uuid: RatingUuid,
    pub cart_item_uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,

    /// Score from 1 to 5.
    pub score: u8,

    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// New Rating Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub uuid: RatingUuid,
    pub cart_item_uuid: CartItemUuid,
    pub score: u8,
    pub comment: Option<String>,
}
