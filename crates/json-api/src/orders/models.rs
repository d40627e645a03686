//! Order request and response bodies.

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    orders::models::{Order, OrderStatus, TransitionOutcome},
    users::models::UserUuid,
};

use crate::extensions::*;

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The paid cart item this order line is
    pub uuid: Uuid,

    pub cart_uuid: Uuid,
    pub buyer_uuid: Option<Uuid>,
    pub product_uuid: Uuid,
    pub shop_uuid: Option<Uuid>,

    /// Unit price in minor units
    pub unit_price: u64,

    pub quantity: u64,

    /// One of `to_order`, `to_receive`, `complete`, `cancel_by_user`, `cancel_by_shop`
    pub status: String,

    pub cancel_reason: Option<String>,
    pub payment_uuid: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            cart_uuid: order.cart_uuid.into(),
            buyer_uuid: order.buyer_uuid.map(Into::into),
            product_uuid: order.product_uuid.into(),
            shop_uuid: order.shop_uuid.map(Into::into),
            unit_price: order.unit_price,
            quantity: order.quantity,
            status: order.status.to_string(),
            cancel_reason: order.cancel_reason,
            payment_uuid: order.payment_uuid.map(Into::into),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Requested status
    pub status: String,

    /// Stored when the order is cancelled
    pub cancel_reason: Option<String>,
}

/// Update Order Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusResponse {
    /// Whether the transition was applied
    pub success: bool,

    pub message: String,

    /// The order after the request, unchanged when rejected
    pub order: OrderResponse,
}

impl From<TransitionOutcome> for UpdateOrderStatusResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            order: outcome.order.into(),
        }
    }
}

/// Parse an optional `status` query value.
pub(crate) fn parse_status_filter(
    status: Option<String>,
) -> Result<Option<OrderStatus>, StatusError> {
    status
        .map(|status| status.parse::<OrderStatus>().or_400("Unknown order status"))
        .transpose()
}

/// Orders are visible to their buyer and to the selling shop.
pub(crate) fn is_party(order: &Order, user: UserUuid) -> bool {
    order.buyer_uuid == Some(user) || order.shop_uuid == Some(user)
}

/// Buyers confirm receipt or cancel their own order; shops ship or cancel
/// as the seller. Nobody requests `to_order`, payment sets it.
pub(crate) fn may_request(order: &Order, user: UserUuid, status: OrderStatus) -> bool {
    let buyer = order.buyer_uuid == Some(user);
    let shop = order.shop_uuid == Some(user);

    match status {
        OrderStatus::Complete | OrderStatus::CancelByUser => buyer,
        OrderStatus::ToReceive | OrderStatus::CancelByShop => shop,
        OrderStatus::ToOrder => false,
    }
}
