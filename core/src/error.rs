use thiserror::Error;

use crate::model::project::Hotkey;

/// Rejections of caller input. The operation that raised one left every
/// component untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project '{0}' already exists")]
    DuplicateName(String),
    #[error("invalid project name '{0}'")]
    InvalidName(String),
    #[error("hotkey must be a single digit 1-9, got '{0}'")]
    InvalidHotkey(String),
    #[error("hotkey {0} is already assigned")]
    DuplicateHotkey(Hotkey),
    #[error("unknown project '{0}'")]
    UnknownProject(String),
    #[error("no project bound to hotkey {0}")]
    UnboundHotkey(Hotkey),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid state transition: {0}")]
    InvalidTransition(&'static str),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// A single line of a text table that could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid duration '{0}'")]
    Duration(String),
    #[error("invalid {field} '{value}'")]
    Field { field: &'static str, value: String },
}
