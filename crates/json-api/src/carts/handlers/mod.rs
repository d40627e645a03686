//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod paid;
