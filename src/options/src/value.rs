// modflowrs-options/src/value.rs

//! Option sub-values: coercion from tokens, rendering and typed extraction.

use crate::error::{OptionBlockError, Result};
use crate::spec::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sub-value stored for an enabled option.
///
/// Text values are kept upper-case; option words are case-insensitive for
/// the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Integer(_) => ValueKind::Integer,
            OptionValue::Real(_) => ValueKind::Real,
            OptionValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Reals, with integers widened.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            OptionValue::Real(f) => Some(*f),
            OptionValue::Integer(i) => Some(*i as f64),
            OptionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce an option-line token to `kind`.
    pub(crate) fn from_token(option: &str, token: &str, kind: ValueKind) -> Result<Self> {
        let parsed = match kind {
            ValueKind::Integer => token.parse::<i64>().ok().map(OptionValue::Integer),
            ValueKind::Real => parse_real(token).map(OptionValue::Real),
            ValueKind::Text => Some(OptionValue::Text(token.to_uppercase())),
        };
        parsed.ok_or_else(|| OptionBlockError::type_mismatch(option, token, kind))
    }

    /// Check a programmatically supplied value against `kind`.
    ///
    /// Integers widen to reals; nothing else converts. Text must be a single
    /// non-empty token so it reads back as one value.
    pub(crate) fn conform(self, option: &str, kind: ValueKind) -> Result<Self> {
        match (self, kind) {
            (OptionValue::Integer(i), ValueKind::Integer) => Ok(OptionValue::Integer(i)),
            (OptionValue::Integer(i), ValueKind::Real) => Ok(OptionValue::Real(i as f64)),
            (OptionValue::Real(f), ValueKind::Real) => Ok(OptionValue::Real(f)),
            (OptionValue::Text(s), ValueKind::Text) => {
                if s.is_empty() || s.chars().any(char::is_whitespace) {
                    return Err(OptionBlockError::type_mismatch(
                        option.to_string(),
                        format!("{:?}", s),
                        kind,
                    ));
                }
                Ok(OptionValue::Text(s.to_uppercase()))
            }
            (other, kind) => Err(OptionBlockError::type_mismatch(
                option.to_string(),
                other.to_string(),
                kind,
            )),
        }
    }
}

/// Parse a real token, accepting Fortran `D` exponents.
fn parse_real(token: &str) -> Option<f64> {
    let normalized = token.replace(['d', 'D'], "e");
    normalized.parse::<f64>().ok()
}

/// Reals always carry a decimal point so they read back as reals.
fn format_real(value: f64) -> String {
    let s = value.to_string();
    if !value.is_finite() || s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{}.0", s)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Real(v) => write!(f, "{}", format_real(*v)),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Real(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// Typed extraction of a single sub-value.
pub trait FromOptionValue: Sized {
    const KIND: ValueKind;

    fn from_option_value(value: &OptionValue) -> Option<Self>;
}

impl FromOptionValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_integer()
    }
}

impl FromOptionValue for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_integer().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromOptionValue for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_real()
    }
}

impl FromOptionValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

/// Typed extraction of all sub-values of an option.
///
/// Implemented for `Vec<T>` and for tuples of up to four scalars.
pub trait FromOptionValues: Sized {
    fn from_option_values(values: &[OptionValue]) -> Option<Self>;
}

impl<T: FromOptionValue> FromOptionValues for Vec<T> {
    fn from_option_values(values: &[OptionValue]) -> Option<Self> {
        values.iter().map(T::from_option_value).collect()
    }
}

macro_rules! tuple_from_option_values {
    ($len:expr; $($name:ident : $idx:tt),+) => {
        impl<$($name: FromOptionValue),+> FromOptionValues for ($($name,)+) {
            fn from_option_values(values: &[OptionValue]) -> Option<Self> {
                if values.len() != $len {
                    return None;
                }
                Some(($($name::from_option_value(&values[$idx])?,)+))
            }
        }
    };
}

tuple_from_option_values!(1; A: 0);
tuple_from_option_values!(2; A: 0, B: 1);
tuple_from_option_values!(3; A: 0, B: 1, C: 2);
tuple_from_option_values!(4; A: 0, B: 1, C: 2, D: 3);
