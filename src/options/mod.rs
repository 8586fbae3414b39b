//! Enumerated metadata options and their resolution rules.
//!
//! Every enumerated field accepts either its raw code or a string alias.
//! Absent values fall back to the field default; anything that does not
//! land in the valid set is rejected with the sorted valid set attached.

mod type_hints;

pub use type_hints::{TYPE_HINTS, TypeHint, resolve_type_hint};

use crate::error::ValidationError;
use serde::Deserialize;
use std::fmt;

/// A raw enumerated value as written in metadata.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric code, e.g. `1`
    Code(i64),
    /// String alias, e.g. `"list"`
    Alias(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Alias(alias) => write!(f, "\"{alias}\""),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for OptionValue {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

/// Static table describing one integer-coded enumerated field.
#[derive(Debug)]
pub struct OptionTable {
    /// Field name used in error messages.
    pub field: &'static str,
    /// Valid codes, sorted ascending.
    pub valid: &'static [i32],
    /// Human-readable aliases.
    pub aliases: &'static [(&'static str, i32)],
    /// Code substituted when the field is absent.
    pub default: i32,
}

impl OptionTable {
    /// Resolves a raw value to a valid code.
    ///
    /// Aliases match case-insensitively; strings that are not aliases are
    /// tried as integer codes.
    pub fn resolve(&self, value: Option<&OptionValue>) -> Result<i32, ValidationError> {
        let Some(value) = value else {
            log::debug!("{}: absent, using default {}", self.field, self.default);
            return Ok(self.default);
        };

        let code = match value {
            OptionValue::Code(code) => i32::try_from(*code).ok(),
            OptionValue::Alias(alias) => self.alias_code(alias).or_else(|| alias.trim().parse().ok()),
        };

        match code {
            Some(code) if self.valid.contains(&code) => Ok(code),
            _ => Err(self.invalid(value)),
        }
    }

    fn alias_code(&self, alias: &str) -> Option<i32> {
        let alias = alias.trim();
        self.aliases
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
            .map(|(_, code)| *code)
    }

    fn invalid(&self, value: &OptionValue) -> ValidationError {
        ValidationError::InvalidOption {
            field: self.field.to_string(),
            value: value.to_string(),
            valid: self.valid.iter().map(i32::to_string).collect(),
        }
    }
}

/// Component exposure level (toolbar visibility).
pub static EXPOSURE: OptionTable = OptionTable {
    field: "exposure",
    valid: &[-1, 2, 4, 8, 16, 32, 64, 128],
    aliases: &[
        ("hidden", -1),
        ("default", 2),
        ("primary", 2),
        ("secondary", 4),
        ("tertiary", 8),
        ("quarternary", 16),
        ("quinary", 32),
        ("senary", 64),
        ("septenary", 128),
    ],
    default: 2,
};

/// How an input parameter hands data to the script.
pub static ACCESS: OptionTable = OptionTable {
    field: "scriptParamAccess",
    valid: &[0, 1, 2],
    aliases: &[("item", 0), ("list", 1), ("tree", 2)],
    default: 0,
};

/// How wires into an input parameter are drawn.
pub static WIRE_DISPLAY: OptionTable = OptionTable {
    field: "wireDisplay",
    valid: &[0, 1, 2],
    aliases: &[("default", 0), ("faint", 1), ("hidden", 2)],
    default: 0,
};

/// Resolves a component exposure level.
pub fn resolve_exposure(value: Option<&OptionValue>) -> Result<i32, ValidationError> {
    EXPOSURE.resolve(value)
}

/// Resolves an input parameter access mode.
pub fn resolve_access(value: Option<&OptionValue>) -> Result<i32, ValidationError> {
    ACCESS.resolve(value)
}

/// Resolves an input parameter wire display mode.
pub fn resolve_wire_display(value: Option<&OptionValue>) -> Result<i32, ValidationError> {
    WIRE_DISPLAY.resolve(value)
}
