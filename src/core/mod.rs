//! Reconciliation logic.

pub mod collector;
pub mod event;
pub mod fixer;
pub mod manifest;
pub mod oplog;
pub mod paths;
pub mod requirement;

#[cfg(test)]
pub(crate) mod test_support;
