//! Filesystem gateway and path helpers.

pub mod fs;
pub mod path;
