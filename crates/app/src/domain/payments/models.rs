//! Payment Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    domain::{
        carts::models::{CartItemUuid, CartUuid},
        products::models::ProductUuid,
        users::models::UserUuid,
        vouchers::models::VoucherUuid,
    },
    uuids::TypedUuid,
};

/// Payment UUID
pub type PaymentUuid = TypedUuid<Payment>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment status: {0}")]
pub struct ParsePaymentStatusError(String);

impl FromStr for PaymentStatus {
    type Err = ParsePaymentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParsePaymentStatusError(s.to_string()))
    }
}

/// Payment Model. Amounts are in minor units.
#[derive(Debug, Clone)]
pub struct Payment {
    pub uuid: PaymentUuid,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub address: String,
    pub subtotal: u64,

    /// Delivery fee before discounts.
    pub delivery_fee: u64,

    pub delivery_discount: u64,
    pub coupon_discount: u64,
    pub total: u64,
    pub status: PaymentStatus,
    pub voucher_uuids: Vec<VoucherUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Checkout of unpaid items already in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub uuid: PaymentUuid,
    pub cart_uuid: CartUuid,
    pub items: Vec<CartItemUuid>,
    pub address: String,
    pub delivery_fee: u64,
    pub voucher_codes: SmallVec<[String; 2]>,

    /// Total the client showed the customer. Checkout is refused when it
    /// differs from the recomputed total.
    pub quoted_total: u64,
}

/// Buy-now checkout of a single product, bypassing the cart contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDirectPayment {
    pub uuid: PaymentUuid,
    pub cart_item_uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i64,
    pub address: String,
    pub delivery_fee: u64,
    pub voucher_codes: SmallVec<[String; 2]>,
    pub quoted_total: u64,
}
