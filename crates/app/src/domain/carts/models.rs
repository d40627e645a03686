//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{
        orders::models::OrderStatus, payments::models::PaymentUuid, products::models::ProductUuid,
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Model
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,

    /// Owning customer, `None` for anonymous carts.
    pub user_uuid: Option<UserUuid>,

    /// Live (not soft-deleted) items, paid and unpaid, oldest first.
    pub items: Vec<CartItem>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,

    /// Seller of the product, copied when the item was added.
    pub shop_uuid: Option<UserUuid>,

    /// Current product price in minor units.
    pub unit_price: u64,

    pub quantity: u64,
    pub is_paid: bool,

    /// Order lifecycle state, `Some` exactly when the item is paid.
    pub status: Option<OrderStatus>,

    pub cancel_reason: Option<String>,
    pub payment_uuid: Option<PaymentUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl CartItem {
    /// Line total in minor units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// NewCartItem Model
///
/// The cart is resolved from `user_uuid` first, then `cart_uuid`, otherwise a
/// new anonymous cart is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i64,
    pub cart_uuid: Option<CartUuid>,
    pub user_uuid: Option<UserUuid>,
}

/// Addresses a single unpaid cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemTarget {
    Item(CartItemUuid),
    CartProduct {
        cart: CartUuid,
        product: ProductUuid,
    },
}

/// Result of marking a batch of cart items as paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkPaidOutcome {
    pub success: bool,
    pub updated: u64,
}
