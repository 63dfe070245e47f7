//! Integration tests for the wixtree manifest compiler

mod id_stability;
mod manifest_structure;
mod order_independence;
mod support;
