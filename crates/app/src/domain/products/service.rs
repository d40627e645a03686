//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductUpdate, ProductUuid},
            repository::PgProductsRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(shop_uuid = %shop, product_uuid = %product.uuid),
        err
    )]
    async fn create_product(
        &self,
        shop: UserUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, shop, product)
            .await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, price = created.price, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(shop_uuid = %shop, product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        shop: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if update.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, shop, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(shop_uuid = %shop, product_uuid = %product),
        err
    )]
    async fn delete_product(
        &self,
        shop: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, shop, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products that have not been deleted.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product sold by `shop`.
    async fn create_product(
        &self,
        shop: UserUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Updates name and price of a product owned by `shop`.
    async fn update_product(
        &self,
        shop: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft-deletes a product owned by `shop`.
    async fn delete_product(
        &self,
        shop: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
