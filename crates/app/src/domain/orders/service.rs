//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::models::CartItemUuid,
        notifications::{
            Notifier,
            models::{NewNotification, NotificationKind},
        },
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderStatus, TransitionOutcome},
            repository::PgOrdersRepository,
            transitions,
        },
        products::repository::PgProductsRepository,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
    notifier: Notifier,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Notifier) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
            notifier,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(&self, order: CartItemUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        buyer: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .repository
            .list_buyer_orders(&mut tx, buyer, status)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_shop_orders(
        &self,
        shop: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .repository
            .list_shop_orders(&mut tx, shop, status)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.transition",
        skip(self, cancel_reason),
        fields(cart_item_uuid = %order, requested = %requested),
        err
    )]
    async fn transition(
        &self,
        order: CartItemUuid,
        requested: OrderStatus,
        cancel_reason: Option<String>,
    ) -> Result<TransitionOutcome, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .repository
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let adjustment = match transitions::transition(current.status, requested) {
            Ok(adjustment) => adjustment,
            Err(rejection) => {
                debug!(current = %current.status, %rejection, "rejected order transition");

                return Ok(TransitionOutcome {
                    success: false,
                    message: rejection.to_string(),
                    order: current,
                });
            }
        };

        let cancel_reason = if requested.is_cancelled() {
            cancel_reason
                .map(|reason| reason.trim().to_string())
                .filter(|reason| !reason.is_empty())
        } else {
            None
        };

        let updated = self
            .repository
            .set_order_status(&mut tx, order, requested, cancel_reason)
            .await?;

        self.products_repository
            .adjust_sold(&mut tx, updated.product_uuid, adjustment, updated.quantity)
            .await?;

        tx.commit().await?;

        info!(
            cart_item_uuid = %updated.uuid,
            from = %current.status,
            to = %updated.status,
            "order status changed"
        );

        self.notifier
            .dispatch(status_notifications(&updated))
            .await;

        Ok(TransitionOutcome {
            success: true,
            message: format!("order is now {}", describe(updated.status)),
            order: updated,
        })
    }
}

fn describe(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::ToOrder => "awaiting shipment",
        OrderStatus::ToReceive => "on its way",
        OrderStatus::Complete => "complete",
        OrderStatus::CancelByUser => "cancelled by the customer",
        OrderStatus::CancelByShop => "cancelled by the shop",
    }
}

/// One notification for the buyer and one, worded for the seller, for the shop.
fn status_notifications(order: &Order) -> Vec<NewNotification> {
    let status = describe(order.status);

    let buyer = order.buyer_uuid.map(|buyer| {
        NewNotification::new(
            buyer,
            NotificationKind::OrderStatus,
            format!("Your order {} is {status}", order.uuid),
        )
    });

    let shop = order.shop_uuid.map(|shop| {
        NewNotification::new(
            shop,
            NotificationKind::OrderStatus,
            format!("Order {} for {} item(s) is {status}", order.uuid, order.quantity),
        )
    });

    buyer
        .into_iter()
        .chain(shop)
        .map(|notification| {
            notification
                .for_item(order.uuid)
                .with_status(order.status.as_str())
        })
        .collect()
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a single paid cart item.
    async fn get_order(&self, order: CartItemUuid) -> Result<Order, OrdersServiceError>;

    /// Orders placed by `buyer`, optionally filtered by status.
    async fn list_orders(
        &self,
        buyer: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders for products sold by `shop`, optionally filtered by status.
    async fn list_shop_orders(
        &self,
        shop: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move a paid item to `requested`. The status change and its effect on
    /// the product's sold counter commit together; disallowed moves are
    /// reported through [`TransitionOutcome::success`].
    async fn transition(
        &self,
        order: CartItemUuid,
        requested: OrderStatus,
        cancel_reason: Option<String>,
    ) -> Result<TransitionOutcome, OrdersServiceError>;
}
