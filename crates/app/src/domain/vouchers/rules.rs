//! Voucher eligibility and discount rules.

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::vouchers::models::{Voucher, VoucherKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoucherRejection {
    #[error("voucher is not active")]
    Inactive,

    #[error("voucher has been fully redeemed")]
    Exhausted,

    #[error("voucher is not valid yet")]
    NotStarted,

    #[error("voucher has expired")]
    Expired,

    #[error("order is below the voucher's minimum value")]
    BelowMinimumOrder,
}

/// Discount a voucher grants on an order, in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discount {
    pub delivery: u64,
    pub coupon: u64,
}

impl Voucher {
    /// Whether the voucher can be redeemed at `now`. The minimum order value
    /// is only checked when a subtotal is known.
    ///
    /// # Errors
    ///
    /// Returns the first rule the voucher fails.
    pub fn check(&self, subtotal: Option<u64>, now: Timestamp) -> Result<(), VoucherRejection> {
        if !self.active {
            return Err(VoucherRejection::Inactive);
        }

        if self.remaining == 0 {
            return Err(VoucherRejection::Exhausted);
        }

        if now < self.starts_at {
            return Err(VoucherRejection::NotStarted);
        }

        if now > self.ends_at {
            return Err(VoucherRejection::Expired);
        }

        if subtotal.is_some_and(|subtotal| subtotal < self.min_order_value) {
            return Err(VoucherRejection::BelowMinimumOrder);
        }

        Ok(())
    }

    /// Discount for an order. Capped by `max_discount` and never more than
    /// the amount being discounted.
    #[must_use]
    pub fn discount(&self, subtotal: u64, delivery_fee: u64) -> Discount {
        match self.kind {
            VoucherKind::FreeShipping => Discount {
                delivery: delivery_fee.min(self.max_discount),
                coupon: 0,
            },
            VoucherKind::Percentage { percent } => {
                let raw = subtotal.saturating_mul(u64::from(percent)) / 100;

                Discount {
                    delivery: 0,
                    coupon: raw.min(self.max_discount).min(subtotal),
                }
            }
        }
    }
}
