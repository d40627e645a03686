//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{
        amount_to_i64, try_get_amount, try_get_optional_parsed, try_get_optional_timestamp,
        try_get_timestamp,
    },
    domain::{
        carts::models::{CartItem, CartItemTarget, CartItemUuid, CartUuid},
        orders::models::OrderStatus,
        payments::models::PaymentUuid,
        products::models::ProductUuid,
        users::models::UserUuid,
    },
    uuids::into_uuids,
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const MERGE_CART_ITEM_SQL: &str = include_str!("../sql/merge_cart_item.sql");
const FIND_UNPAID_ITEM_SQL: &str = include_str!("../sql/find_unpaid_item.sql");
const FIND_UNPAID_CART_PRODUCT_SQL: &str = include_str!("../sql/find_unpaid_cart_product.sql");
const SET_ITEM_QUANTITY_SQL: &str = include_str!("../sql/set_item_quantity.sql");
const DELETE_UNPAID_ITEM_SQL: &str = include_str!("../sql/delete_unpaid_item.sql");
const CLEAR_UNPAID_ITEMS_SQL: &str = include_str!("../sql/clear_unpaid_items.sql");
const MARK_ITEMS_PAID_SQL: &str = include_str!("../sql/mark_items_paid.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert an unpaid line, or add `quantity` to the existing unpaid line
    /// for the same product in one statement.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] when the product does not exist.
    pub(crate) async fn merge_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(MERGE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(amount_to_i64(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find and lock a live unpaid item.
    pub(crate) async fn find_unpaid_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        target: CartItemTarget,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        match target {
            CartItemTarget::Item(item) => {
                query_as::<Postgres, CartItem>(FIND_UNPAID_ITEM_SQL)
                    .bind(item.into_uuid())
                    .fetch_optional(&mut **tx)
                    .await
            }
            CartItemTarget::CartProduct { cart, product } => {
                query_as::<Postgres, CartItem>(FIND_UNPAID_CART_PRODUCT_SQL)
                    .bind(cart.into_uuid())
                    .bind(product.into_uuid())
                    .fetch_optional(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn set_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: u64,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(SET_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(amount_to_i64(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a live unpaid item.
    pub(crate) async fn delete_unpaid_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_UNPAID_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Hard-delete every unpaid item in the cart.
    pub(crate) async fn clear_unpaid_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_UNPAID_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn mark_items_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ITEMS_PAID_SQL)
            .bind(cart.into_uuid())
            .bind(into_uuids(items))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            shop_uuid: row
                .try_get::<Option<Uuid>, _>("shop_uuid")?
                .map(UserUuid::from_uuid),
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_amount(row, "quantity")?,
            is_paid: row.try_get("is_paid")?,
            status: try_get_optional_parsed::<OrderStatus>(row, "status")?,
            cancel_reason: row.try_get("cancel_reason")?,
            payment_uuid: row
                .try_get::<Option<Uuid>, _>("payment_uuid")?
                .map(PaymentUuid::from_uuid),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
