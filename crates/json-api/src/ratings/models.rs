//! Rating request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::ratings::models::{NewRating, Rating};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    pub uuid: Uuid,

    /// The purchased cart item being rated
    pub cart_item_uuid: Uuid,

    pub product_uuid: Uuid,
    pub user_uuid: Uuid,

    /// 1 to 5
    pub score: u8,

    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            uuid: rating.uuid.into(),
            cart_item_uuid: rating.cart_item_uuid.into(),
            product_uuid: rating.product_uuid.into(),
            user_uuid: rating.user_uuid.into(),
            score: rating.score,
            comment: rating.comment,
            created_at: rating.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingsResponse {
    pub ratings: Vec<RatingResponse>,
}

/// Create Rating Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateRatingRequest {
    pub uuid: Uuid,
    pub cart_item_uuid: Uuid,
    pub score: u8,
    pub comment: Option<String>,
}

impl From<CreateRatingRequest> for NewRating {
    fn from(request: CreateRatingRequest) -> Self {
        NewRating {
            uuid: request.uuid.into(),
            cart_item_uuid: request.cart_item_uuid.into(),
            score: request.score,
            comment: request.comment,
        }
    }
}
