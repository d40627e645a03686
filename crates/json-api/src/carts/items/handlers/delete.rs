//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{into_status_error, owned_cart},
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes an unpaid item. Paid items cannot be removed.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;

    state
        .app
        .carts
        .remove_item(cart.uuid, item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use storefront_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            models::{CartItemUuid, CartUuid},
        },
        users::models::UserUuid,
    };

    use crate::{
        carts::tests::{expect_own_cart, make_cart},
        test_helpers::{authenticated_service, mock_app},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut app = mock_app();
        app.carts = Arc::new(carts);

        authenticated_service(
            app,
            Router::with_path("carts/{cart}/items/{item}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_item_returns_204() {
        let cart = CartUuid::new();
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        carts
            .expect_remove_item()
            .once()
            .withf(move |c, i| *c == cart && *i == item)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/carts/{cart}/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_delete_paid_item_returns_404() {
        let cart = CartUuid::new();
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{cart}/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_delete_item_in_other_users_cart_returns_404() {
        let cart = CartUuid::new();
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(make_cart(cart, Some(UserUuid::new()))));

        carts.expect_remove_item().never();

        let res = TestClient::delete(format!("http://example.com/carts/{cart}/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
