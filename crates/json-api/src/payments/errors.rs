//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Payment already exists")
        }
        PaymentsServiceError::VoucherExhausted { code } => {
            StatusError::conflict().brief(format!("Voucher {code} has been fully redeemed"))
        }
        PaymentsServiceError::TotalMismatch { quoted, computed } => StatusError::bad_request()
            .brief(format!(
                "Quoted total {quoted} does not match computed total {computed}"
            )),
        PaymentsServiceError::InvalidTransition { from, to } => {
            StatusError::bad_request().brief(format!("Payment cannot move from {from} to {to}"))
        }
        PaymentsServiceError::InvalidReference
        | PaymentsServiceError::MissingRequiredData
        | PaymentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid payment payload")
        }
        PaymentsServiceError::Sql(source) => {
            error!("payment storage error: {source}");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::NotFound => {
            StatusError::not_found().brief("Payment, cart or item not found")
        }
    }
}
