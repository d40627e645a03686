//! Rating Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::ratings::RatingsServiceError;

pub(crate) fn into_status_error(error: RatingsServiceError) -> StatusError {
    match error {
        RatingsServiceError::AlreadyRated => StatusError::conflict().brief("Item already rated"),
        RatingsServiceError::NotRateable => {
            StatusError::bad_request().brief("Only completed orders can be rated")
        }
        RatingsServiceError::InvalidReference | RatingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid rating payload")
        }
        RatingsServiceError::Sql(source) => {
            error!("rating storage error: {source}");

            StatusError::internal_server_error()
        }
        RatingsServiceError::NotFound => StatusError::not_found().brief("Item not found"),
    }
}
