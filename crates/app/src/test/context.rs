//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        notifications::{Notifier, PgNotificationsService},
        orders::PgOrdersService,
        payments::PgPaymentsService,
        products::{
            PgProductsService, ProductsService,
            models::{NewProduct, Product, ProductUuid},
        },
        ratings::PgRatingsService,
        users::{
            PgUsersService, UsersService,
            models::{NewUser, UserUuid},
        },
        vouchers::PgVouchersService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub payments: PgPaymentsService,
    pub vouchers: PgVouchersService,
    pub ratings: PgRatingsService,
    pub notifications: PgNotificationsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let notifications = PgNotificationsService::new(db.clone());
        let notifier = Notifier::new(Arc::new(notifications.clone()));

        Self {
            users: PgUsersService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), notifier.clone()),
            payments: PgPaymentsService::new(db.clone(), notifier.clone()),
            vouchers: PgVouchersService::new(db.clone()),
            ratings: PgRatingsService::new(db, notifier),
            notifications,
            db: test_db,
        }
    }

    /// Register a user, returning its id.
    pub async fn create_user(&self, name: &str) -> UserUuid {
        let uuid = UserUuid::new();

        self.users
            .create_user(NewUser {
                uuid,
                name: name.to_string(),
            })
            .await
            .expect("Failed to create test user");

        uuid
    }

    /// List a product for sale by `shop`.
    pub async fn create_product(&self, shop: UserUuid, price: u64) -> Product {
        let uuid = ProductUuid::new();

        self.products
            .create_product(
                shop,
                NewProduct {
                    uuid,
                    name: format!("Product {uuid}"),
                    price,
                },
            )
            .await
            .expect("Failed to create test product")
    }
}
