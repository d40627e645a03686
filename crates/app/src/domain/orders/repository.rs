//! Orders Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_parsed, try_get_timestamp},
    domain::{
        carts::models::{CartItemUuid, CartUuid},
        orders::models::{Order, OrderStatus},
        payments::models::PaymentUuid,
        products::models::ProductUuid,
        users::models::UserUuid,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_BUYER_ORDERS_SQL: &str = include_str!("sql/list_buyer_orders.sql");
const LIST_SHOP_ORDERS_SQL: &str = include_str!("sql/list_shop_orders.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("sql/set_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: CartItemUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a paid item and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: CartItemUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_buyer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_BUYER_ORDERS_SQL)
            .bind(buyer.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_shop_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_SHOP_ORDERS_SQL)
            .bind(shop.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: CartItemUuid,
        status: OrderStatus,
        cancel_reason: Option<String>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(cancel_reason)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            buyer_uuid: row
                .try_get::<Option<Uuid>, _>("buyer_uuid")?
                .map(UserUuid::from_uuid),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            shop_uuid: row
                .try_get::<Option<Uuid>, _>("shop_uuid")?
                .map(UserUuid::from_uuid),
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_amount(row, "quantity")?,
            status: try_get_parsed::<OrderStatus>(row, "status")?,
            cancel_reason: row.try_get("cancel_reason")?,
            payment_uuid: row
                .try_get::<Option<Uuid>, _>("payment_uuid")?
                .map(PaymentUuid::from_uuid),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
