//! Checkout totals.

use crate::domain::vouchers::rules::Discount;

/// Amounts stored on a payment, in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentTotals {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub delivery_discount: u64,
    pub coupon_discount: u64,
    pub total: u64,
}

impl PaymentTotals {
    /// Combine the redeemed vouchers' discounts. Delivery discounts never
    /// exceed the fee and coupon discounts never exceed the subtotal.
    #[must_use]
    pub fn compute(subtotal: u64, delivery_fee: u64, discounts: &[Discount]) -> Self {
        let delivery_discount = discounts
            .iter()
            .fold(0_u64, |acc, d| acc.saturating_add(d.delivery))
            .min(delivery_fee);

        let coupon_discount = discounts
            .iter()
            .fold(0_u64, |acc, d| acc.saturating_add(d.coupon))
            .min(subtotal);

        let total = (subtotal - coupon_discount).saturating_add(delivery_fee - delivery_discount);

        Self {
            subtotal,
            delivery_fee,
            delivery_discount,
            coupon_discount,
            total,
        }
    }
}

/// Sum of `unit_price * quantity` over the lines.
#[must_use]
pub fn subtotal<I>(lines: I) -> u64
where
    I: IntoIterator<Item = (u64, u64)>,
{
    lines.into_iter().fold(0_u64, |acc, (unit_price, quantity)| {
        acc.saturating_add(unit_price.saturating_mul(quantity))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_vouchers_total_is_subtotal_plus_fee() {
        let totals = PaymentTotals::compute(2_500, 300, &[]);

        assert_eq!(totals.total, 2_800);
        assert_eq!(totals.delivery_discount, 0);
        assert_eq!(totals.coupon_discount, 0);
    }

    #[test]
    fn discounts_are_applied_to_their_own_amounts() {
        let totals = PaymentTotals::compute(
            2_000,
            300,
            &[
                Discount {
                    delivery: 300,
                    coupon: 0,
                },
                Discount {
                    delivery: 0,
                    coupon: 200,
                },
            ],
        );

        assert_eq!(totals.delivery_discount, 300);
        assert_eq!(totals.coupon_discount, 200);
        assert_eq!(totals.total, 1_800);
    }

    #[test]
    fn stacked_discounts_never_go_below_zero() {
        let totals = PaymentTotals::compute(
            100,
            50,
            &[
                Discount {
                    delivery: 40,
                    coupon: 90,
                },
                Discount {
                    delivery: 40,
                    coupon: 90,
                },
            ],
        );

        assert_eq!(totals.delivery_discount, 50);
        assert_eq!(totals.coupon_discount, 100);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn subtotal_multiplies_price_by_quantity() {
        assert_eq!(subtotal([(250, 2), (1_000, 1)]), 1_500);
        assert_eq!(subtotal(std::iter::empty()), 0);
    }
}
