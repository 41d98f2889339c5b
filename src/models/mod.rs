//! Data structures read from the manifest.

pub mod manifest;
pub mod options;
