//! App Router

use salvo::Router;

use crate::{auth, carts, notifications, orders, payments, products, ratings, users, vouchers};

/// Every authenticated route of the API.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("users/me").get(users::me::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("ratings").get(ratings::product::handler)),
                ),
        )
        .push(
            Router::with_path("carts")
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .delete(carts::clear::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .delete(carts::items::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("products/{product}")
                                .put(carts::items::update::handler),
                        )
                        .push(Router::with_path("paid").post(carts::paid::handler))
                        .push(
                            Router::with_path("payments/{payment}")
                                .put(payments::assign::handler),
                        ),
                ),
        )
        .push(Router::with_path("cart-items").post(carts::items::add::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(Router::with_path("shop/orders").get(orders::shop::handler))
        .push(
            Router::with_path("payments")
                .get(payments::index::handler)
                .post(payments::create::handler)
                .push(Router::with_path("direct").post(payments::direct::handler))
                .push(
                    Router::with_path("{payment}")
                        .get(payments::get::handler)
                        .push(Router::with_path("status").put(payments::status::handler)),
                ),
        )
        .push(
            Router::with_path("vouchers")
                .get(vouchers::index::handler)
                .post(vouchers::create::handler)
                .push(
                    Router::with_path("{code}")
                        .get(vouchers::get::handler)
                        .push(Router::with_path("apply").post(vouchers::apply::handler)),
                ),
        )
        .push(Router::with_path("ratings").post(ratings::create::handler))
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(
                    Router::with_path("{notification}/read").put(notifications::read::handler),
                ),
        )
}
