//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{into_status_error, models::ProductResponse},
    state::State,
};

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, models::ProductUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{authenticated_service, mock_app};

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService) -> Service {
        let mut app = mock_app();
        app.products = Arc::new(products);

        authenticated_service(app, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_product(uuid, 350)));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.price, 350);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_get_malformed_uuid_returns_400() {
        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
