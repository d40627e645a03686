//! Payment request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use storefront_app::domain::payments::models::{NewDirectPayment, NewPayment, Payment};

/// Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub cart_uuid: Uuid,
    pub address: String,

    /// Sum of the paid lines in minor units
    pub subtotal: u64,

    /// Delivery fee before discounts
    pub delivery_fee: u64,

    pub delivery_discount: u64,
    pub coupon_discount: u64,

    /// Amount charged
    pub total: u64,

    /// One of `pending`, `processing`, `completed`, `cancelled`
    pub status: String,

    /// Vouchers redeemed by this payment
    pub voucher_uuids: Vec<Uuid>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            uuid: payment.uuid.into(),
            user_uuid: payment.user_uuid.into(),
            cart_uuid: payment.cart_uuid.into(),
            address: payment.address,
            subtotal: payment.subtotal,
            delivery_fee: payment.delivery_fee,
            delivery_discount: payment.delivery_discount,
            coupon_discount: payment.coupon_discount,
            total: payment.total,
            status: payment.status.to_string(),
            voucher_uuids: payment.voucher_uuids.into_iter().map(Into::into).collect(),
            created_at: payment.created_at.to_string(),
            updated_at: payment.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentsResponse {
    pub payments: Vec<PaymentResponse>,
}

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentRequest {
    pub uuid: Uuid,
    pub cart_uuid: Uuid,

    /// Unpaid cart items to check out
    pub items: Vec<Uuid>,

    pub address: String,
    pub delivery_fee: u64,

    #[serde(default)]
    pub voucher_codes: SmallVec<[String; 2]>,

    /// Total shown to the customer
    pub quoted_total: u64,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(request: CreatePaymentRequest) -> Self {
        NewPayment {
            uuid: request.uuid.into(),
            cart_uuid: request.cart_uuid.into(),
            items: request.items.into_iter().map(Into::into).collect(),
            address: request.address,
            delivery_fee: request.delivery_fee,
            voucher_codes: request.voucher_codes,
            quoted_total: request.quoted_total,
        }
    }
}

/// Direct Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateDirectPaymentRequest {
    pub uuid: Uuid,

    /// Id for the cart item created for the purchase
    pub cart_item_uuid: Uuid,

    pub product_uuid: Uuid,
    pub quantity: i64,
    pub address: String,
    pub delivery_fee: u64,

    #[serde(default)]
    pub voucher_codes: SmallVec<[String; 2]>,

    pub quoted_total: u64,
}

impl From<CreateDirectPaymentRequest> for NewDirectPayment {
    fn from(request: CreateDirectPaymentRequest) -> Self {
        NewDirectPayment {
            uuid: request.uuid.into(),
            cart_item_uuid: request.cart_item_uuid.into(),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
            address: request.address,
            delivery_fee: request.delivery_fee,
            voucher_codes: request.voucher_codes,
            quoted_total: request.quoted_total,
        }
    }
}

/// Update Payment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePaymentStatusRequest {
    pub status: String,
}

/// Assign Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssignedItemsResponse {
    /// Paid items now carrying the payment
    pub updated: u64,
}
