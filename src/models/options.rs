//! Options handed to the fixer and to module accessors.

use crate::constants;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixerOptions {
    /// Mode applied to every required path.
    #[serde(default = "default_mode", with = "octal")]
    pub mode: u32,

    /// Override for directories.
    #[serde(
        default,
        with = "octal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub directory_mode: Option<u32>,

    /// Override for files.
    #[serde(
        default,
        with = "octal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_mode: Option<u32>,
}

impl Default for FixerOptions {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            directory_mode: None,
            file_mode: None,
        }
    }
}

impl FixerOptions {
    pub fn directory_mode(&self) -> u32 {
        self.directory_mode.unwrap_or(self.mode)
    }

    pub fn file_mode(&self) -> u32 {
        self.file_mode.unwrap_or(self.mode)
    }
}

fn default_mode() -> u32 {
    constants::DEFAULT_MODE
}

/// Parse an octal mode such as `0775`, `775` or `0o775`.
pub fn parse_mode(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err("empty mode".to_string());
    }
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| format!("'{}' is not an octal mode", input))?;
    check_mode(mode)
}

fn check_mode(mode: u32) -> Result<u32, String> {
    if mode & !constants::MODE_MASK != 0 {
        return Err(format!("mode {:o} has bits outside {:o}", mode, constants::MODE_MASK));
    }
    Ok(mode)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMode {
    Int(u32),
    Text(String),
}

impl RawMode {
    fn into_mode(self) -> Result<u32, String> {
        match self {
            RawMode::Int(mode) => check_mode(mode),
            RawMode::Text(text) => parse_mode(&text),
        }
    }
}

mod octal {
    use super::*;

    pub fn serialize<S: Serializer>(mode: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:04o}", mode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        RawMode::deserialize(deserializer)?
            .into_mode()
            .map_err(serde::de::Error::custom)
    }
}

mod octal_opt {
    use super::*;

    pub fn serialize<S: Serializer>(mode: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match mode {
            Some(mode) => serializer.serialize_str(&format!("{:04o}", mode)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        Option::<RawMode>::deserialize(deserializer)?
            .map(RawMode::into_mode)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
