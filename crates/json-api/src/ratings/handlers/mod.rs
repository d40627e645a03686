//! Rating Handlers

pub(crate) mod create;
pub(crate) mod product;
