//! Mark Items Paid Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{
        into_status_error,
        models::{MarkItemsPaidRequest, MarkItemsPaidResponse},
        owned_cart,
    },
    extensions::*,
    state::State,
};

/// Mark Items Paid Handler
///
/// Moves unpaid items into the order flow. Unknown or already paid items are
/// skipped and `is_paid: false` changes nothing.
#[endpoint(
    tags("carts"),
    summary = "Mark Items Paid",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Items marked"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<MarkItemsPaidRequest>,
    depot: &mut Depot,
) -> Result<Json<MarkItemsPaidResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let cart = owned_cart(state, cart.into_inner().into(), user).await?;

    let outcome = state
        .app
        .carts
        .mark_items_paid(
            cart.uuid,
            request.is_paid,
            request.items.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
