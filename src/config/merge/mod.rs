//! Config composition.

pub(crate) mod merge_policy;
pub(crate) mod service;
