//! Orders
//!
//! A paid cart item is an order line. Its status moves through the table in
//! [`transitions`].

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod transitions;

pub use errors::OrdersServiceError;
pub use service::*;
