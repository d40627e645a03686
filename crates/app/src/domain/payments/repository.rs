//! Payments Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, try_get_amount, try_get_parsed, try_get_timestamp},
    domain::{
        carts::models::{CartItem, CartItemUuid, CartUuid},
        payments::{
            models::{Payment, PaymentStatus, PaymentUuid},
            totals::PaymentTotals,
        },
        products::models::ProductUuid,
        users::models::UserUuid,
        vouchers::models::VoucherUuid,
    },
    uuids::into_uuids,
};

const GET_PAYMENT_SQL: &str = include_str!("sql/get_payment.sql");
const LOCK_PAYMENT_SQL: &str = include_str!("sql/lock_payment.sql");
const LIST_PAYMENTS_SQL: &str = include_str!("sql/list_payments.sql");
const CREATE_PAYMENT_SQL: &str = include_str!("sql/create_payment.sql");
const LINK_VOUCHERS_SQL: &str = include_str!("sql/link_vouchers.sql");
const SET_PAYMENT_STATUS_SQL: &str = include_str!("sql/set_payment_status.sql");
const LOCK_CHECKOUT_ITEMS_SQL: &str = include_str!("sql/lock_checkout_items.sql");
const PAY_ITEMS_SQL: &str = include_str!("sql/pay_items.sql");
const CREATE_PAID_ITEM_SQL: &str = include_str!("sql/create_paid_item.sql");
const STAMP_PAID_ITEMS_SQL: &str = include_str!("sql/stamp_paid_items.sql");

/// Row values for a new payment.
pub(crate) struct PaymentRecord<'a> {
    pub(crate) uuid: PaymentUuid,
    pub(crate) user_uuid: UserUuid,
    pub(crate) cart_uuid: CartUuid,
    pub(crate) address: &'a str,
    pub(crate) totals: PaymentTotals,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
    ) -> Result<Payment, sqlx::Error> {
        query_as::<Postgres, Payment>(GET_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
    ) -> Result<Payment, sqlx::Error> {
        query_as::<Postgres, Payment>(LOCK_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_payments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        query_as::<Postgres, Payment>(LIST_PAYMENTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentRecord<'_>,
    ) -> Result<(), sqlx::Error> {
        let totals = payment.totals;

        query(CREATE_PAYMENT_SQL)
            .bind(payment.uuid.into_uuid())
            .bind(payment.user_uuid.into_uuid())
            .bind(payment.cart_uuid.into_uuid())
            .bind(payment.address)
            .bind(amount_to_i64(totals.subtotal, "subtotal")?)
            .bind(amount_to_i64(totals.delivery_fee, "delivery_fee")?)
            .bind(amount_to_i64(totals.delivery_discount, "delivery_discount")?)
            .bind(amount_to_i64(totals.coupon_discount, "coupon_discount")?)
            .bind(amount_to_i64(totals.total, "total")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn link_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        vouchers: &[VoucherUuid],
    ) -> Result<(), sqlx::Error> {
        if vouchers.is_empty() {
            return Ok(());
        }

        query(LINK_VOUCHERS_SQL)
            .bind(payment.into_uuid())
            .bind(into_uuids(vouchers))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PAYMENT_STATUS_SQL)
            .bind(payment.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Lock the requested unpaid items of a cart, with current product prices.
    /// Items that are paid, removed or unknown are left out.
    pub(crate) async fn lock_checkout_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemUuid],
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(LOCK_CHECKOUT_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(into_uuids(items))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn pay_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemUuid],
        payment: PaymentUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PAY_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(into_uuids(items))
            .bind(payment.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Insert an item that is paid from the start.
    pub(crate) async fn create_paid_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u64,
        payment: PaymentUuid,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(CREATE_PAID_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(amount_to_i64(quantity, "quantity")?)
            .bind(payment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Stamp the payment onto paid items of the cart that have none yet.
    pub(crate) async fn stamp_paid_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        payment: PaymentUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(STAMP_PAID_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(payment.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Payment {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            address: row.try_get("address")?,
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            delivery_discount: try_get_amount(row, "delivery_discount")?,
            coupon_discount: try_get_amount(row, "coupon_discount")?,
            total: try_get_amount(row, "total")?,
            status: try_get_parsed::<PaymentStatus>(row, "status")?,
            voucher_uuids: row
                .try_get::<Vec<Uuid>, _>("voucher_uuids")?
                .into_iter()
                .map(VoucherUuid::from_uuid)
                .collect(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
