//! Capabilities a module can implement to declare required paths.
//!
//! A module may declare directories, files, both or neither. The two
//! capabilities are separate traits; [`Module`] exposes whichever ones a
//! type implements.

use crate::models::options::FixerOptions;
use thiserror::Error;

/// A value returned by a module accessor that is not a list of path strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRequirement {
    #[error("got {found}")]
    NotAnArray { found: String },

    #[error("entry {index} is {found}")]
    NonStringEntry { index: usize, found: String },
}

pub type RequirementList = Result<Vec<String>, MalformedRequirement>;

pub trait RequireDirectoryPermission {
    fn required_directories(&self, options: &FixerOptions) -> RequirementList;
}

pub trait RequireFilePermission {
    fn required_files(&self, options: &FixerOptions) -> RequirementList;
}

/// An installed module as seen by the fixer.
pub trait Module {
    fn name(&self) -> &str;

    fn directory_requirement(&self) -> Option<&dyn RequireDirectoryPermission> {
        None
    }

    fn file_requirement(&self) -> Option<&dyn RequireFilePermission> {
        None
    }
}

/// Validate a raw TOML value as a list of path strings.
pub fn paths_from_value(value: &toml::Value) -> RequirementList {
    let items = value.as_array().ok_or_else(|| MalformedRequirement::NotAnArray {
        found: describe(value),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            toml::Value::String(path) => Ok(path.clone()),
            other => Err(MalformedRequirement::NonStringEntry {
                index,
                found: describe(other),
            }),
        })
        .collect()
}

fn describe(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("string \"{}\"", s),
        toml::Value::Integer(i) => format!("integer {}", i),
        toml::Value::Float(f) => format!("float {}", f),
        toml::Value::Boolean(b) => format!("boolean {}", b),
        toml::Value::Datetime(d) => format!("datetime {}", d),
        toml::Value::Array(_) => "an array".to_string(),
        toml::Value::Table(_) => "a table".to_string(),
    }
}
