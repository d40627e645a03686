//! Voucher Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Voucher UUID
pub type VoucherUuid = TypedUuid<Voucher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherKind {
    /// Discounts the delivery fee.
    FreeShipping,

    /// Discounts `percent` of the order subtotal.
    Percentage { percent: u8 },
}

impl VoucherKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FreeShipping => "free_shipping",
            Self::Percentage { .. } => "percentage",
        }
    }
}

/// Voucher Model
#[derive(Debug, Clone, PartialEq)]
pub struct Voucher {
    pub uuid: VoucherUuid,
    pub code: String,
    pub kind: VoucherKind,

    /// Redemptions left, never below zero.
    pub remaining: u64,

    /// Smallest order subtotal the voucher applies to, in minor units.
    pub min_order_value: u64,

    /// Upper bound of the discount, in minor units.
    pub max_discount: u64,

    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Voucher Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    pub uuid: VoucherUuid,
    pub code: String,
    pub kind: VoucherKind,
    pub remaining: u64,
    pub min_order_value: u64,
    pub max_discount: u64,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Result of checking a voucher code ahead of checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherPreview {
    pub success: bool,
    pub voucher: Option<Voucher>,
    pub message: String,
}
