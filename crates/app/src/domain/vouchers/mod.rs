//! Vouchers

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod rules;
pub mod service;

pub use errors::VouchersServiceError;
pub use service::*;
