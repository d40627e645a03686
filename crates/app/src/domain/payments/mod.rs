//! Payments

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod status;
pub mod totals;

pub use errors::PaymentsServiceError;
pub use service::*;
