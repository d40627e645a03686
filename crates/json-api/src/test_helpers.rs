//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService, notifications::MockNotificationsService,
        orders::MockOrdersService, payments::MockPaymentsService, products::MockProductsService,
        ratings::MockRatingsService, users::MockUsersService, users::models::UserUuid,
        vouchers::MockVouchersService,
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// An app whose services fail the test on any call. Tests swap in the mock
/// they set expectations on.
pub(crate) fn mock_app() -> AppContext {
    AppContext {
        users: Arc::new(MockUsersService::new()),
        products: Arc::new(MockProductsService::new()),
        carts: Arc::new(MockCartsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        payments: Arc::new(MockPaymentsService::new()),
        vouchers: Arc::new(MockVouchersService::new()),
        ratings: Arc::new(MockRatingsService::new()),
        notifications: Arc::new(MockNotificationsService::new()),
        auth: Arc::new(MockAuthService::new()),
    }
}

pub(crate) fn state_from(app: AppContext) -> Arc<State> {
    State::from_app_context(app)
}

/// Serve `route` as [`TEST_USER_UUID`] without going through bearer auth.
pub(crate) fn authenticated_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_from(app)))
            .hoop(inject_user)
            .push(route),
    )
}

/// A database failure for exercising 500 responses.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolClosed
}
