//! Payment status transitions.

use crate::domain::payments::models::PaymentStatus::{self, Cancelled, Completed, Pending, Processing};

/// Accepted `(current, requested)` payment status pairs.
pub const TRANSITIONS: &[(PaymentStatus, PaymentStatus)] = &[
    (Pending, Processing),
    (Processing, Completed),
    (Pending, Cancelled),
];

#[must_use]
pub fn can_transition(current: PaymentStatus, requested: PaymentStatus) -> bool {
    TRANSITIONS.contains(&(current, requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_accepted() {
        assert!(can_transition(Pending, Processing));
        assert!(can_transition(Processing, Completed));
        assert!(can_transition(Pending, Cancelled));
    }

    #[test]
    fn completed_is_terminal() {
        for requested in PaymentStatus::ALL {
            assert!(!can_transition(Completed, requested), "completed -> {requested}");
        }
    }

    #[test]
    fn processing_payment_cannot_be_cancelled() {
        assert!(!can_transition(Processing, Cancelled));
        assert!(!can_transition(Cancelled, Pending));
    }
}
