//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{Cart, CartItem, CartItemTarget, CartItemUuid, CartUuid, MarkPaidOutcome, NewCartItem},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(name = "carts.service.get_or_create_cart", skip(self), err)]
    async fn get_or_create_cart(&self, cart: Option<CartUuid>) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, cart.unwrap_or_default())
            .await?;

        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(product_uuid = %item.product_uuid, quantity = item.quantity),
        err
    )]
    async fn add_item(&self, item: NewCartItem) -> Result<CartItem, CartsServiceError> {
        let quantity = positive_quantity(item.quantity).ok_or(CartsServiceError::InvalidData)?;

        let mut tx = self.db.begin_transaction().await?;

        let cart = match (item.user_uuid, item.cart_uuid) {
            (Some(user), _) => {
                self.carts_repository
                    .get_or_create_user_cart(&mut tx, CartUuid::new(), user)
                    .await?
            }
            (None, Some(cart)) => {
                self.carts_repository
                    .get_or_create_cart(&mut tx, cart)
                    .await?
            }
            (None, None) => {
                self.carts_repository
                    .get_or_create_cart(&mut tx, CartUuid::new())
                    .await?
            }
        };

        let merged = self
            .items_repository
            .merge_cart_item(&mut tx, cart.uuid, item.uuid, item.product_uuid, quantity)
            .await?;

        tx.commit().await?;

        info!(
            cart_uuid = %merged.cart_uuid,
            cart_item_uuid = %merged.uuid,
            quantity = merged.quantity,
            "added item to cart"
        );

        Ok(merged)
    }

    #[tracing::instrument(name = "carts.service.update_quantity", skip(self), err)]
    async fn update_quantity(
        &self,
        target: CartItemTarget,
        quantity: i64,
    ) -> Result<Option<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self
            .items_repository
            .find_unpaid_item(&mut tx, target)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let Some(quantity) = positive_quantity(quantity) else {
            self.items_repository
                .delete_unpaid_item(&mut tx, item.cart_uuid, item.uuid)
                .await?;

            tx.commit().await?;

            info!(cart_item_uuid = %item.uuid, "removed item from cart");

            return Ok(None);
        };

        let updated = self
            .items_repository
            .set_item_quantity(&mut tx, item.uuid, quantity)
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    #[tracing::instrument(name = "carts.service.remove_item", skip(self), err)]
    async fn remove_item(&self, cart: CartUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_unpaid_item(&mut tx, cart, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.service.clear_unpaid_items", skip(self), err)]
    async fn clear_unpaid_items(&self, cart: CartUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.get_cart(&mut tx, cart).await?;

        let rows_affected = self.items_repository.clear_unpaid_items(&mut tx, cart).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart, removed = rows_affected, "cleared unpaid items");

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "carts.service.mark_items_paid",
        skip(self, items),
        fields(items = items.len()),
        err
    )]
    async fn mark_items_paid(
        &self,
        cart: CartUuid,
        is_paid: bool,
        items: Vec<CartItemUuid>,
    ) -> Result<MarkPaidOutcome, CartsServiceError> {
        // Paid items are immutable, so there is nothing to apply for `false`.
        if !is_paid || items.is_empty() {
            return Ok(MarkPaidOutcome {
                success: true,
                updated: 0,
            });
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .items_repository
            .mark_items_paid(&mut tx, cart, &items)
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %cart, updated, "marked items paid");

        Ok(MarkPaidOutcome {
            success: true,
            updated,
        })
    }
}

/// `Some` for quantities that can be stored on an unpaid line.
fn positive_quantity(quantity: i64) -> Option<u64> {
    u64::try_from(quantity).ok().filter(|quantity| *quantity > 0)
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Returns the cart with its items. A missing or absent id creates a new,
    /// empty cart instead of failing.
    async fn get_or_create_cart(&self, cart: Option<CartUuid>) -> Result<Cart, CartsServiceError>;

    /// Retrieve a single cart with its items.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to a cart, merging with an existing unpaid line for the
    /// same product.
    async fn add_item(&self, item: NewCartItem) -> Result<CartItem, CartsServiceError>;

    /// Overwrite the quantity of an unpaid item. Quantities of zero or less
    /// remove the item and return `None`.
    async fn update_quantity(
        &self,
        target: CartItemTarget,
        quantity: i64,
    ) -> Result<Option<CartItem>, CartsServiceError>;

    /// Remove a single unpaid item.
    async fn remove_item(&self, cart: CartUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Permanently deletes every unpaid item in the cart, returning how many
    /// were removed.
    async fn clear_unpaid_items(&self, cart: CartUuid) -> Result<u64, CartsServiceError>;

    /// Mark the given unpaid items of the cart as paid and ready to order.
    /// Unknown or already paid ids are skipped.
    async fn mark_items_paid(
        &self,
        cart: CartUuid,
        is_paid: bool,
        items: Vec<CartItemUuid>,
    ) -> Result<MarkPaidOutcome, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{orders::models::OrderStatus, products::models::ProductUuid},
        test::TestContext,
    };

    use super::*;

    #[test]
    fn positive_quantity_rejects_zero_and_negative() {
        assert_eq!(positive_quantity(0), None);
        assert_eq!(positive_quantity(-3), None);
        assert_eq!(positive_quantity(4), Some(4));
    }

    fn new_item(product: ProductUuid, quantity: i64, cart: Option<CartUuid>) -> NewCartItem {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            quantity,
            cart_uuid: cart,
            user_uuid: None,
        }
    }

    #[tokio::test]
    async fn get_or_create_cart_creates_cart_under_missing_uuid() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CartUuid::new();

        let created = ctx.carts.get_or_create_cart(Some(uuid)).await?;
        let fetched = ctx.carts.get_or_create_cart(Some(uuid)).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(fetched.uuid, uuid);
        assert!(fetched.items.is_empty());
        assert!(fetched.user_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_get_or_create_for_same_new_uuid_both_return_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CartUuid::new();

        let (first, second) = tokio::join!(
            ctx.carts.get_or_create_cart(Some(uuid)),
            ctx.carts.get_or_create_cart(Some(uuid)),
        );

        assert_eq!(first?.uuid, uuid);
        assert_eq!(second?.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_cart(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 350).await;

        let first = ctx.carts.add_item(new_item(product.uuid, 2, None)).await?;
        let second = ctx
            .carts
            .add_item(new_item(product.uuid, 3, Some(first.cart_uuid)))
            .await?;

        assert_eq!(second.uuid, first.uuid);
        assert_eq!(second.quantity, 5);
        assert!(!second.is_paid);
        assert_eq!(second.status, None);
        assert_eq!(second.shop_uuid, Some(shop));
        assert_eq!(second.unit_price, 350);

        let cart = ctx.carts.get_cart(first.cart_uuid).await?;

        assert_eq!(cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_never_duplicate_unpaid_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;
        let cart = ctx.carts.get_or_create_cart(None).await?;

        let (a, b) = tokio::join!(
            ctx.carts.add_item(new_item(product.uuid, 1, Some(cart.uuid))),
            ctx.carts.add_item(new_item(product.uuid, 1, Some(cart.uuid))),
        );

        a?;
        b?;

        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| item.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_for_user_reuses_their_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let buyer = ctx.create_user("Buyer").await;
        let kettle = ctx.create_product(shop, 100).await;
        let toaster = ctx.create_product(shop, 200).await;

        let first = ctx
            .carts
            .add_item(NewCartItem {
                user_uuid: Some(buyer),
                ..new_item(kettle.uuid, 1, None)
            })
            .await?;

        let second = ctx
            .carts
            .add_item(NewCartItem {
                user_uuid: Some(buyer),
                ..new_item(toaster.uuid, 1, Some(CartUuid::new()))
            })
            .await?;

        assert_eq!(first.cart_uuid, second.cart_uuid);

        let cart = ctx.carts.get_cart(first.cart_uuid).await?;

        assert_eq!(cart.user_uuid, Some(buyer));
        assert_eq!(cart.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.add_item(new_item(ProductUuid::new(), 1, None)).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_with_zero_quantity_is_invalid() {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;

        let result = ctx.carts.add_item(new_item(product.uuid, 0, None)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_quantity_overwrites_rather_than_adds() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;
        let item = ctx.carts.add_item(new_item(product.uuid, 4, None)).await?;

        let updated = ctx
            .carts
            .update_quantity(
                CartItemTarget::CartProduct {
                    cart: item.cart_uuid,
                    product: product.uuid,
                },
                7,
            )
            .await?;

        assert_eq!(updated.map(|item| item.quantity), Some(7));

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_to_zero_or_below_removes_item() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;

        for quantity in [0, -2] {
            let item = ctx.carts.add_item(new_item(product.uuid, 2, None)).await?;

            let result = ctx
                .carts
                .update_quantity(CartItemTarget::Item(item.uuid), quantity)
                .await?;

            assert!(result.is_none());

            let again = ctx
                .carts
                .update_quantity(
                    CartItemTarget::CartProduct {
                        cart: item.cart_uuid,
                        product: product.uuid,
                    },
                    1,
                )
                .await;

            assert!(
                matches!(again, Err(CartsServiceError::NotFound)),
                "expected NotFound, got {again:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_of_paid_item_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;
        let item = ctx.carts.add_item(new_item(product.uuid, 2, None)).await?;

        ctx.carts
            .mark_items_paid(item.cart_uuid, true, vec![item.uuid])
            .await?;

        let result = ctx
            .carts
            .update_quantity(CartItemTarget::Item(item.uuid), 5)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_unpaid_items_is_idempotent_and_keeps_paid_items() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let kettle = ctx.create_product(shop, 100).await;
        let toaster = ctx.create_product(shop, 200).await;

        let paid = ctx.carts.add_item(new_item(kettle.uuid, 1, None)).await?;
        let cart = paid.cart_uuid;

        ctx.carts.add_item(new_item(toaster.uuid, 1, Some(cart))).await?;
        ctx.carts.mark_items_paid(cart, true, vec![paid.uuid]).await?;

        assert_eq!(ctx.carts.clear_unpaid_items(cart).await?, 1);
        assert_eq!(ctx.carts.clear_unpaid_items(cart).await?, 0);

        let cart = ctx.carts.get_cart(cart).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| item.uuid), Some(paid.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn clear_unpaid_items_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.clear_unpaid_items(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn mark_items_paid_skips_already_paid_and_unknown_items() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;
        let item = ctx.carts.add_item(new_item(product.uuid, 2, None)).await?;

        let first = ctx
            .carts
            .mark_items_paid(item.cart_uuid, true, vec![item.uuid, CartItemUuid::new()])
            .await?;
        let second = ctx
            .carts
            .mark_items_paid(item.cart_uuid, true, vec![item.uuid])
            .await?;

        assert_eq!(first.updated, 1);
        assert_eq!(second.updated, 0);
        assert!(second.success);

        let cart = ctx.carts.get_cart(item.cart_uuid).await?;
        let paid = cart.items.first();

        assert_eq!(paid.map(|item| item.is_paid), Some(true));
        assert_eq!(paid.and_then(|item| item.status), Some(OrderStatus::ToOrder));

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_soft_deletes_unpaid_item() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.create_user("Shop").await;
        let product = ctx.create_product(shop, 100).await;
        let item = ctx.carts.add_item(new_item(product.uuid, 2, None)).await?;

        ctx.carts.remove_item(item.cart_uuid, item.uuid).await?;

        let again = ctx.carts.remove_item(item.cart_uuid, item.uuid).await;

        assert!(
            matches!(again, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        let readded = ctx
            .carts
            .add_item(new_item(product.uuid, 1, Some(item.cart_uuid)))
            .await?;

        assert_ne!(readded.uuid, item.uuid);
        assert_eq!(readded.quantity, 1);

        Ok(())
    }
}
