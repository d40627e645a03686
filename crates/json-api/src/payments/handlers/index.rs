//! Payment Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    payments::{into_status_error, models::PaymentsResponse},
    state::State,
};

/// Payment Index Handler
///
/// Returns the caller's payments, newest first.
#[endpoint(
    tags("payments"),
    summary = "List My Payments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PaymentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let payments = state
        .app
        .payments
        .list_payments(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaymentsResponse {
        payments: payments.into_iter().map(Into::into).collect(),
    }))
}
