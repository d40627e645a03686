//! Cart request and response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartItem, MarkPaidOutcome};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The owning user, absent for anonymous carts
    pub user_uuid: Option<Uuid>,

    /// Live items, paid and unpaid, oldest first
    pub items: Vec<CartItemResponse>,

    /// Sum of unpaid line totals in minor units
    pub subtotal: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let subtotal = cart
            .items
            .iter()
            .filter(|item| !item.is_paid)
            .fold(0_u64, |total, item| total.saturating_add(item.line_total()));

        CartResponse {
            uuid: cart.uuid.into(),
            user_uuid: cart.user_uuid.map(Into::into),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            subtotal,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    pub cart_uuid: Uuid,

    /// The unique identifier of the product in the cart item
    pub product_uuid: Uuid,

    /// The user selling the product
    pub shop_uuid: Option<Uuid>,

    /// Current product price in minor units
    pub unit_price: u64,

    pub quantity: u64,

    /// Unit price times quantity
    pub line_total: u64,

    pub is_paid: bool,

    /// Order status, present once the item is paid
    pub status: Option<String>,

    pub cancel_reason: Option<String>,

    pub payment_uuid: Option<Uuid>,

    /// The date and time the item was added
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let line_total = item.line_total();

        Self {
            uuid: item.uuid.into(),
            cart_uuid: item.cart_uuid.into(),
            product_uuid: item.product_uuid.into(),
            shop_uuid: item.shop_uuid.map(Into::into),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total,
            is_paid: item.is_paid,
            status: item.status.as_ref().map(ToString::to_string),
            cancel_reason: item.cancel_reason,
            payment_uuid: item.payment_uuid.map(Into::into),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Or Create Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct GetOrCreateCartRequest {
    /// Existing cart to load. Unknown ids create a cart under that id.
    pub cart_uuid: Option<Uuid>,
}

/// Clear Unpaid Items Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearedItemsResponse {
    /// Number of unpaid items removed
    pub removed: u64,
}

/// Mark Items Paid Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MarkItemsPaidRequest {
    pub is_paid: bool,

    /// Cart items to mark
    pub items: Vec<Uuid>,
}

/// Mark Items Paid Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MarkItemsPaidResponse {
    pub success: bool,

    /// Number of items that changed
    pub updated: u64,
}

impl From<MarkPaidOutcome> for MarkItemsPaidResponse {
    fn from(outcome: MarkPaidOutcome) -> Self {
        Self {
            success: outcome.success,
            updated: outcome.updated,
        }
    }
}
