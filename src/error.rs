//! Error types for the task-table generator.

use std::fmt;
use std::io;

/// Errors that can occur while loading descriptors or rendering artifacts.
#[derive(Debug)]
pub enum Error {
    /// The descriptor document is not valid TOML.
    Parse(toml::de::Error),
    /// A task entry lacks a required field.
    MissingField {
        /// Id of the offending task entry.
        task: String,
        /// Name of the missing field.
        field: &'static str,
    },
    /// Two task entries share the same id.
    DuplicateId(String),
    /// A priority tier outside the enumerated set.
    UnknownPriority {
        /// Id of the offending task entry.
        task: String,
        /// The unrecognized tier value.
        value: String,
    },
    /// A stack size that is neither a known class nor a positive integer.
    UnknownStackClass {
        /// Id of the offending task entry.
        task: String,
        /// The unrecognized stack-size value.
        value: String,
    },
    /// The ceiling, base unit, or namespace configuration is unusable.
    InvalidConfig(String),
    /// I/O error reading the document or writing an artifact.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "descriptor parse error: {e}"),
            Self::MissingField { task, field } => {
                write!(f, "task '{task}' is missing required field '{field}'")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id '{id}'"),
            Self::UnknownPriority { task, value } => {
                write!(f, "task '{task}' has unknown priority '{value}' (expected high, medium, or low)")
            }
            Self::UnknownStackClass { task, value } => {
                write!(
                    f,
                    "task '{task}' has unknown stack size '{value}' (expected large, medium, small, or a positive integer)"
                )
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
