//! Update Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartItemTarget;

use crate::{
    carts::{
        into_status_error, items::models::UpdateQuantityRequest, models::CartItemResponse,
        owned_cart,
    },
    extensions::*,
    state::State,
};

/// Update Cart Item Quantity Handler
///
/// Overwrites the quantity of the unpaid line for a product. A quantity of
/// zero or less removes the line and answers `204 No Content`.
#[endpoint(
    tags("carts"),
    summary = "Set Product Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated", body = CartItemResponse),
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;

    let target = CartItemTarget::CartProduct {
        cart: cart.uuid,
        product: product.into_inner().into(),
    };

    let updated = state
        .app
        .carts
        .update_quantity(target, json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    match updated {
        Some(item) => res.render(Json(CartItemResponse::from(item))),
        None => {
            res.status_code(StatusCode::NO_CONTENT);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            models::{CartItemUuid, CartUuid},
        },
        products::models::ProductUuid,
    };
    use testresult::TestResult;

    use crate::{
        carts::tests::{expect_own_cart, make_item},
        test_helpers::{authenticated_service, mock_app},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut app = mock_app();
        app.carts = Arc::new(carts);

        authenticated_service(
            app,
            Router::with_path("carts/{cart}/products/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_quantity_returns_item() -> TestResult {
        let cart = CartUuid::new();
        let product = ProductUuid::new();
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        carts
            .expect_update_quantity()
            .once()
            .withf(move |target, quantity| {
                *target == CartItemTarget::CartProduct { cart, product } && *quantity == 5
            })
            .return_once(move |_, _| Ok(Some(make_item(item, cart, 5))));

        let mut res = TestClient::put(format!(
            "http://example.com/carts/{cart}/products/{product}"
        ))
        .json(&json!({ "quantity": 5 }))
        .send(&make_service(carts))
        .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_to_zero_returns_204() {
        let cart = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        carts
            .expect_update_quantity()
            .once()
            .withf(|_, quantity| *quantity == 0)
            .return_once(|_, _| Ok(None));

        let res = TestClient::put(format!(
            "http://example.com/carts/{cart}/products/{product}"
        ))
        .json(&json!({ "quantity": 0 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_update_quantity_of_paid_item_returns_404() {
        let cart = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        expect_own_cart(&mut carts, cart);

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/carts/{cart}/products/{product}"
        ))
        .json(&json!({ "quantity": 2 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
