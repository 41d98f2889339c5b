//! Module permission fixer.
//!
//! Makes sure the directories and files declared by installed application
//! modules exist and carry a writable mode. Every failure is logged and the
//! run carries on with the remaining paths.
//!
//! ## Modules
//! - `cli`: Command-line handlers
//! - `core`: Reconciliation logic (collector, fixer, events, manifest, log)
//! - `models`: Manifest and option data structures
//! - `util`: Filesystem gateway and path helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
