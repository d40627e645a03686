//! Storefront Domain Concerns

pub mod carts;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod ratings;
pub mod users;
pub mod vouchers;
