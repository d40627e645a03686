//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_to_i64, try_get_amount, try_get_optional_timestamp, try_get_timestamp},
    domain::{
        products::models::{NewProduct, Product, ProductUpdate, ProductUuid, SoldAdjustment},
        users::models::UserUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const INCREMENT_SOLD_SQL: &str = include_str!("sql/increment_sold.sql");
const DECREMENT_SOLD_SQL: &str = include_str!("sql/decrement_sold.sql");
const SET_AVERAGE_RATING_SQL: &str = include_str!("sql/set_average_rating.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: UserUuid,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(shop.into_uuid())
            .bind(product.name)
            .bind(amount_to_i64(product.price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(shop.into_uuid())
            .bind(update.name)
            .bind(amount_to_i64(update.price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(shop.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Apply an order transition's effect on the sold counter.
    pub(crate) async fn adjust_sold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        adjustment: SoldAdjustment,
        quantity: u64,
    ) -> Result<(), sqlx::Error> {
        let sql = match adjustment {
            SoldAdjustment::Increment => INCREMENT_SOLD_SQL,
            SoldAdjustment::Decrement => DECREMENT_SOLD_SQL,
            SoldAdjustment::Unchanged => return Ok(()),
        };

        query(sql)
            .bind(product.into_uuid())
            .bind(amount_to_i64(quantity, "sold")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Hold the product row lock until the transaction ends, serialising
    /// counter updates.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_average_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        average_rating: f64,
    ) -> Result<(), sqlx::Error> {
        query(SET_AVERAGE_RATING_SQL)
            .bind(product.into_uuid())
            .bind(average_rating)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            shop_uuid: UserUuid::from_uuid(row.try_get("shop_uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            sold: try_get_amount(row, "sold")?,
            average_rating: row.try_get("average_rating")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
