use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ParseError, ValidationError};

/// A digit 1-9 bound to at most one project.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hotkey(u8);

impl Hotkey {
    pub fn new(digit: u8) -> Result<Self, ValidationError> {
        if (1..=9).contains(&digit) {
            Ok(Self(digit))
        } else {
            Err(ValidationError::InvalidHotkey(digit.to_string()))
        }
    }

    pub fn from_char(c: char) -> Result<Self, ValidationError> {
        match c.to_digit(10) {
            Some(d) => Self::new(d as u8),
            None => Err(ValidationError::InvalidHotkey(c.to_string())),
        }
    }

    pub fn digit(self) -> u8 {
        self.0
    }
}

impl FromStr for Hotkey {
    type Err = ValidationError;

    /// Only a lone digit is accepted; `" 5"`, `"05"` and `"10"` are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).map_err(|_| ValidationError::InvalidHotkey(s.to_string())),
            _ => Err(ValidationError::InvalidHotkey(s.to_string())),
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub hotkey: Option<Hotkey>,
}

impl Project {
    pub fn new(name: String, hotkey: Option<Hotkey>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            hotkey,
        }
    }

    /// Display form with the hotkey marker, e.g. `(1) Project 1`.
    pub fn label(&self) -> String {
        match self.hotkey {
            Some(key) => format!("({}) {}", key, self.name),
            None => self.name.clone(),
        }
    }

    /// `id|name|hotkey`, hotkey left empty when unbound.
    pub fn to_row(&self) -> String {
        let hotkey = self.hotkey.map(|k| k.to_string()).unwrap_or_default();
        format!("{}|{}|{}", self.id, self.name, hotkey)
    }

    pub fn parse_row(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                expected: 3,
                found: fields.len(),
            });
        }

        let id = Uuid::parse_str(fields[0].trim()).map_err(|_| ParseError::Field {
            field: "project id",
            value: fields[0].to_string(),
        })?;
        let name = fields[1].to_string();
        if name.trim().is_empty() {
            return Err(ParseError::Field {
                field: "project name",
                value: name,
            });
        }
        let hotkey = match fields[2].trim() {
            "" => None,
            raw => Some(raw.parse::<Hotkey>().map_err(|_| ParseError::Field {
                field: "hotkey",
                value: raw.to_string(),
            })?),
        };

        Ok(Self { id, name, hotkey })
    }
}

/// Names end up inside three different text formats; reject anything that
/// would break one of them. Log and summary lines are re-parsed by splitting
/// on `" - "` and `": "` and by stripping a leading `(n)`, so none of those
/// may appear in a name.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains('|')
        || trimmed.contains(": ")
        || trimmed.contains(" - ")
        || trimmed.contains(['\n', '\r'])
        || has_hotkey_marker(trimmed)
    {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// `(n)` with a single digit, as produced by [`Project::label`].
pub fn has_hotkey_marker(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'(' && bytes[1].is_ascii_digit() && bytes[2] == b')'
}
