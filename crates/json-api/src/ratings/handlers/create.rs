//! Create Rating Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    ratings::{
        into_status_error,
        models::{CreateRatingRequest, RatingResponse},
    },
    state::State,
};

/// Create Rating Handler
///
/// Rates a completed order line the caller bought. Each line can be rated once.
#[endpoint(
    tags("ratings"),
    summary = "Rate Purchase",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Rating created"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::CONFLICT, description = "Item already rated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRatingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RatingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let rating = state
        .app
        .ratings
        .create_rating(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(rating.into()))
}
