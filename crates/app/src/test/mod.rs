//! Database-backed test infrastructure.

mod context;

pub(crate) use context::TestContext;
