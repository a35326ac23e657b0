// modflowrs-arrayfmt/src/kind.rs

//! Numeric kinds of arrays and the Fortran edit descriptors that write them.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use strum_macros::{Display, EnumString};

/// Values per line used by both numeric kinds unless told otherwise.
pub const DEFAULT_VALUES_PER_LINE: usize = 20;

/// Element type of an array.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NumericKind {
    Real,
    Integer,
}

impl NumericKind {
    pub fn default_format_kind(self) -> FormatKind {
        match self {
            NumericKind::Real => FormatKind::Exponential,
            NumericKind::Integer => FormatKind::Integer,
        }
    }

    /// Width floor: the width that holds any value at full precision.
    pub fn default_width(self) -> usize {
        match self {
            NumericKind::Real => 15,
            NumericKind::Integer => 10,
        }
    }

    /// Decimal floor.
    pub fn default_decimal(self) -> usize {
        match self {
            NumericKind::Real => 6,
            NumericKind::Integer => 0,
        }
    }

    /// Whether `kind` can write values of this numeric kind.
    pub fn accepts(self, kind: FormatKind) -> bool {
        match self {
            NumericKind::Real => kind != FormatKind::Integer,
            NumericKind::Integer => kind == FormatKind::Integer,
        }
    }
}

/// The letter of a Fortran edit descriptor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum FormatKind {
    /// `Fw.d`
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Fixed,
    /// `Ew.d`
    #[serde(rename = "E")]
    #[strum(serialize = "E")]
    Exponential,
    /// `Gw.d`
    #[serde(rename = "G")]
    #[strum(serialize = "G")]
    General,
    /// `Dw.d`, exponential with a `D` marker
    #[serde(rename = "D")]
    #[strum(serialize = "D")]
    Double,
    /// `Iw`
    #[serde(rename = "I")]
    #[strum(serialize = "I")]
    Integer,
}

impl FormatKind {
    /// Whether the descriptor carries a `.d` part.
    pub fn has_decimal(self) -> bool {
        self != FormatKind::Integer
    }
}

/// Element types the array writer accepts.
pub trait ArrayValue: Copy {
    const KIND: NumericKind;

    fn to_f64(self) -> f64;

    fn to_i64(self) -> i64;

    /// Binary layout: single precision reals, 32-bit integers, little endian.
    fn write_binary<W: Write>(self, writer: &mut W) -> io::Result<()>;
}

macro_rules! real_array_value {
    ($($ty:ty),+) => {
        $(
            impl ArrayValue for $ty {
                const KIND: NumericKind = NumericKind::Real;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_i64(self) -> i64 {
                    self as i64
                }

                fn write_binary<W: Write>(self, writer: &mut W) -> io::Result<()> {
                    writer.write_all(&(self as f32).to_le_bytes())
                }
            }
        )+
    };
}

macro_rules! integer_array_value {
    ($($ty:ty),+) => {
        $(
            impl ArrayValue for $ty {
                const KIND: NumericKind = NumericKind::Integer;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn to_i64(self) -> i64 {
                    self as i64
                }

                fn write_binary<W: Write>(self, writer: &mut W) -> io::Result<()> {
                    let value = i32::try_from(self).map_err(|_| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("{} does not fit a 32-bit binary integer", self),
                        )
                    })?;
                    writer.write_all(&value.to_le_bytes())
                }
            }
        )+
    };
}

real_array_value!(f32, f64);
integer_array_value!(i32, i64, u32, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_kind_strings() {
        assert_eq!(FormatKind::from_str("e").unwrap(), FormatKind::Exponential);
        assert_eq!(FormatKind::from_str("F").unwrap(), FormatKind::Fixed);
        assert_eq!(FormatKind::Double.to_string(), "D");
        assert!(FormatKind::from_str("X").is_err());
        assert_eq!(NumericKind::from_str("REAL").unwrap(), NumericKind::Real);
    }

    #[test]
    fn test_kind_compatibility() {
        assert!(NumericKind::Real.accepts(FormatKind::General));
        assert!(!NumericKind::Real.accepts(FormatKind::Integer));
        assert!(NumericKind::Integer.accepts(FormatKind::Integer));
        assert!(!NumericKind::Integer.accepts(FormatKind::Fixed));
    }

    #[test]
    fn test_binary_layout() {
        let mut out = Vec::new();
        1.5f64.write_binary(&mut out).unwrap();
        7i64.write_binary(&mut out).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(&out[..4], &1.5f32.to_le_bytes());
        assert_eq!(&out[4..], &7i32.to_le_bytes());
    }

    #[test]
    fn test_binary_integer_out_of_range() {
        let mut out = Vec::new();
        let err = 5_000_000_000i64.write_binary(&mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(out.is_empty());
        (-2_147_483_648i64).write_binary(&mut out).unwrap();
        assert_eq!(out, i32::MIN.to_le_bytes());
    }
}
