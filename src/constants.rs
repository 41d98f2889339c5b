//! Centralized constants for modes, file names, and environment variables.

/// Mode applied to required paths when the manifest does not set one.
pub const DEFAULT_MODE: u32 = 0o775;

/// Manifest file looked up at the project root.
pub const MANIFEST_FILE_NAME: &str = "permissions.toml";

/// Environment variable overriding the project root.
pub const ROOT_ENV: &str = "PERMFIX_ROOT";

/// Only permission bits are ever applied.
pub const MODE_MASK: u32 = 0o7777;

/// Suffix of the message logged when a module accessor returns a malformed value.
pub const MALFORMED_SUFFIX: &str = "should return an array.";
