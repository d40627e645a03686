//! Product Models

use jiff::Timestamp;

use crate::{domain::users::models::UserUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,

    /// The user selling this product.
    pub shop_uuid: UserUuid,

    pub name: String,

    /// Price in minor units.
    pub price: u64,

    /// Units delivered to buyers. Only moved by order status transitions.
    pub sold: u64,

    /// Mean rating score rounded to one decimal, `0.0` before the first rating.
    pub average_rating: f64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: u64,
}

/// Change applied to [`Product::sold`] when an order changes status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoldAdjustment {
    /// Add the item quantity.
    Increment,

    /// Subtract the item quantity, never going below zero.
    Decrement,

    Unchanged,
}
