//! Order status transition table.

use thiserror::Error;

use crate::domain::{
    orders::models::OrderStatus::{self, CancelByShop, CancelByUser, Complete, ToOrder, ToReceive},
    products::models::SoldAdjustment,
};

/// Every accepted `(current, requested)` pair and its effect on the product's
/// sold counter. Pairs not listed are rejected.
pub const TRANSITIONS: &[(OrderStatus, OrderStatus, SoldAdjustment)] = &[
    (ToOrder, ToReceive, SoldAdjustment::Unchanged),
    (ToOrder, CancelByUser, SoldAdjustment::Unchanged),
    (ToOrder, CancelByShop, SoldAdjustment::Unchanged),
    (ToReceive, Complete, SoldAdjustment::Increment),
    (ToReceive, CancelByUser, SoldAdjustment::Decrement),
    (ToReceive, CancelByShop, SoldAdjustment::Decrement),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    #[error("order can only be completed once it has been shipped")]
    NotShipped,

    #[error("order can no longer be cancelled")]
    NotCancellable,

    #[error("order cannot move from {from} to {to}")]
    Unsupported { from: OrderStatus, to: OrderStatus },
}

/// Look up the requested transition.
///
/// # Errors
///
/// Returns the reason when the pair is not in [`TRANSITIONS`].
pub fn transition(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<SoldAdjustment, TransitionRejection> {
    TRANSITIONS
        .iter()
        .find(|(from, to, _)| *from == current && *to == requested)
        .map(|(_, _, adjustment)| *adjustment)
        .ok_or(match requested {
            Complete => TransitionRejection::NotShipped,
            CancelByUser | CancelByShop => TransitionRejection::NotCancellable,
            ToOrder | ToReceive => TransitionRejection::Unsupported {
                from: current,
                to: requested,
            },
        })
}
