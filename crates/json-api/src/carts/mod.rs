//! Carts

mod access;
mod errors;
mod handlers;
pub(crate) mod items;
pub(crate) mod models;

pub(crate) use access::owned_cart;
pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
