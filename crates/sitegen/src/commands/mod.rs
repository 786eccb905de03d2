//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod serve;
