// modflowrs-arrayfmt/src/descriptor.rs

//! Fortran edit descriptors as they appear on array control records.

use crate::error::{ArrayFormatError, Result};
use crate::kind::FormatKind;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref FIXED_DESCRIPTOR: Regex =
        Regex::new(r"^\((\d*)([FEGDI])(\d+)(?:\.(\d+))?\)$").expect("descriptor pattern");
}

/// A parsed edit descriptor: `(20E15.6)`, `(10I10)`, `(FREE)` or `(BINARY)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Free,
    Binary,
    Fixed {
        count: usize,
        kind: FormatKind,
        width: usize,
        decimal: usize,
    },
}

fn number(text: &str, what: &str, descriptor: &str) -> Result<usize> {
    text.parse::<usize>().map_err(|_| {
        ArrayFormatError::format_error(descriptor.to_string(), format!("{} '{}' is out of range", what, text))
    })
}

impl FromStr for Descriptor {
    type Err = ArrayFormatError;

    fn from_str(text: &str) -> Result<Self> {
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        match compact.as_str() {
            "(FREE)" => return Ok(Descriptor::Free),
            "(BINARY)" => return Ok(Descriptor::Binary),
            _ => {}
        }

        let caps = FIXED_DESCRIPTOR.captures(&compact).ok_or_else(|| {
            ArrayFormatError::format_error(
                text,
                "expected (<count><kind><width>.<decimal>), (FREE) or (BINARY)",
            )
        })?;

        let count = match caps.get(1).map(|m| m.as_str()) {
            None | Some("") => 1,
            Some(digits) => number(digits, "repeat count", text)?,
        };
        let kind = FormatKind::from_str(&caps[2])
            .map_err(|_| ArrayFormatError::format_error(text, "unknown edit descriptor"))?;
        let width = number(&caps[3], "field width", text)?;
        let decimal = match (kind.has_decimal(), caps.get(4)) {
            (true, Some(digits)) => number(digits.as_str(), "decimal places", text)?,
            (true, None) => {
                return Err(ArrayFormatError::format_error(
                    text.to_string(),
                    format!("{} descriptor needs decimal places", kind),
                ))
            }
            // Iw.m gives a minimum digit count, not decimals
            (false, _) => 0,
        };

        let descriptor = Descriptor::Fixed {
            count,
            kind,
            width,
            decimal,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl Descriptor {
    /// Check the ranges the grammar cannot express: a positive repeat count
    /// and width, and for F/E/G/D fewer decimal places than the width.
    pub fn validate(&self) -> Result<()> {
        let Descriptor::Fixed {
            count,
            kind,
            width,
            decimal,
        } = *self
        else {
            return Ok(());
        };
        let message = if count == 0 {
            "repeat count must be positive"
        } else if width == 0 {
            "field width must be positive"
        } else if kind.has_decimal() && decimal >= width {
            "decimal places must be smaller than the field width"
        } else {
            return Ok(());
        };
        Err(ArrayFormatError::format_error(self.to_string(), message.to_string()))
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Free => write!(f, "(FREE)"),
            Descriptor::Binary => write!(f, "(BINARY)"),
            Descriptor::Fixed {
                count,
                kind,
                width,
                decimal,
            } => {
                if kind.has_decimal() {
                    write!(f, "({}{}{}.{})", count, kind, width, decimal)
                } else {
                    write!(f, "({}{}{})", count, kind, width)
                }
            }
        }
    }
}
