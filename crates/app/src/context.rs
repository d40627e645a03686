//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, PgAuthService},
    database::Db,
    domain::{
        carts::{CartsService, PgCartsService},
        notifications::{NotificationsService, Notifier, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        payments::{PaymentsService, PgPaymentsService},
        products::{PgProductsService, ProductsService},
        ratings::{PgRatingsService, RatingsService},
        users::{PgUsersService, UsersService},
        vouchers::{PgVouchersService, VouchersService},
    },
};

/// Every service the storefront exposes, behind trait objects so callers can
/// substitute mocks.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub vouchers: Arc<dyn VouchersService>,
    pub ratings: Arc<dyn RatingsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire the `PostgreSQL` services over an existing pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let notifications = Arc::new(PgNotificationsService::new(db.clone()));
        let notifier = Notifier::new(notifications.clone());

        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), notifier.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), notifier.clone())),
            vouchers: Arc::new(PgVouchersService::new(db.clone())),
            ratings: Arc::new(PgRatingsService::new(db.clone(), notifier)),
            notifications,
            auth: Arc::new(PgAuthService::new(db.pool().clone())),
        }
    }
}
