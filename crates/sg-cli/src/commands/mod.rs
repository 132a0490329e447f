//! CLI command implementations

pub(crate) mod common;
pub(crate) mod cost;
pub(crate) mod governance;
pub(crate) mod performance;
pub(crate) mod quality;
pub(crate) mod schemas;
pub(crate) mod seed;
pub(crate) mod summary;
pub(crate) mod usage;
