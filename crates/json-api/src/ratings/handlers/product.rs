//! Product Ratings Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    ratings::{into_status_error, models::RatingsResponse},
    state::State,
};

/// Product Ratings Handler
///
/// Returns a product's ratings, newest first.
#[endpoint(
    tags("ratings"),
    summary = "List Product Ratings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RatingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let ratings = state
        .app
        .ratings
        .list_product_ratings(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(RatingsResponse {
        ratings: ratings.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::{
        carts::models::CartItemUuid,
        products::models::ProductUuid,
        ratings::{
            MockRatingsService,
            models::{Rating, RatingUuid},
        },
        users::models::UserUuid,
    };
    use testresult::TestResult;

    use crate::test_helpers::{authenticated_service, mock_app};

    use super::*;

    #[tokio::test]
    async fn test_lists_ratings_for_product() -> TestResult {
        let product = ProductUuid::new();

        let mut ratings = MockRatingsService::new();

        ratings
            .expect_list_product_ratings()
            .once()
            .withf(move |p| *p == product)
            .return_once(move |product| {
                Ok(vec![Rating {
                    uuid: RatingUuid::new(),
                    cart_item_uuid: CartItemUuid::new(),
                    product_uuid: product,
                    user_uuid: UserUuid::new(),
                    score: 5,
                    comment: None,
                    created_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let mut app = mock_app();
        app.ratings = Arc::new(ratings);

        let service = authenticated_service(
            app,
            Router::with_path("products/{product}/ratings").get(handler),
        );

        let response: RatingsResponse =
            TestClient::get(format!("http://example.com/products/{product}/ratings"))
                .send(&service)
                .await
                .take_json()
                .await?;

        let scores: Vec<_> = response.ratings.iter().map(|r| r.score).collect();

        assert_eq!(scores, vec![5]);

        Ok(())
    }
}
