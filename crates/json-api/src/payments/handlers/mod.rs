//! Payment Handlers

pub(crate) mod assign;
pub(crate) mod create;
pub(crate) mod direct;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        carts::models::CartUuid,
        payments::models::{Payment, PaymentStatus, PaymentUuid},
        users::models::UserUuid,
    };

    pub(crate) fn make_payment(uuid: PaymentUuid, user: UserUuid) -> Payment {
        Payment {
            uuid,
            user_uuid: user,
            cart_uuid: CartUuid::new(),
            address: "1 Main Street".to_string(),
            subtotal: 1_000,
            delivery_fee: 300,
            delivery_discount: 0,
            coupon_discount: 100,
            total: 1_200,
            status: PaymentStatus::Pending,
            voucher_uuids: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
