//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::{
    carts::models::{CartItemUuid, CartUuid},
    payments::models::PaymentUuid,
    products::models::ProductUuid,
    users::models::UserUuid,
};

/// Fulfilment state of a paid cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    ToOrder,
    ToReceive,
    Complete,
    CancelByUser,
    CancelByShop,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::ToOrder,
        Self::ToReceive,
        Self::Complete,
        Self::CancelByUser,
        Self::CancelByShop,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToOrder => "to_order",
            Self::ToReceive => "to_receive",
            Self::Complete => "complete",
            Self::CancelByUser => "cancel_by_user",
            Self::CancelByShop => "cancel_by_shop",
        }
    }

    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::CancelByUser | Self::CancelByShop)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

/// Order Model, a paid cart item seen from the fulfilment side.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub buyer_uuid: Option<UserUuid>,
    pub product_uuid: ProductUuid,
    pub shop_uuid: Option<UserUuid>,
    pub unit_price: u64,
    pub quantity: u64,
    pub status: OrderStatus,
    pub cancel_reason: Option<String>,
    pub payment_uuid: Option<PaymentUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a status change request. Rejected requests are reported with
/// `success: false` and the unchanged order rather than an error.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub success: bool,
    pub message: String,
    pub order: Order,
}
