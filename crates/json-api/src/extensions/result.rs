//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

/// Map any error to an HTTP error.
pub(crate) trait ResultExt<T> {
    /// Logged internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Bad request carrying `brief` as the public message.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_maps_to_bad_request() {
        let result: Result<(), &str> = Err("nope");

        let error = result.or_400("invalid status").err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn or_500_maps_to_internal_error() {
        let result: Result<(), &str> = Err("boom");

        let error = result.or_500("failed").err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
