// modflowrs-arrayfmt/src/lib.rs

//! Array formats for MODFLOW package files.
//!
//! An [`ArrayFormat`] is the single description of how a numeric array is
//! written. It can be set from a Fortran edit descriptor and viewed as one
//! again, as a per-value template, or as a vectorized specifier, and it
//! drives the array writer.
//!
//! ```
//! use modflowrs_arrayfmt::{ArrayFormat, NumericKind};
//!
//! # fn main() -> Result<(), modflowrs_arrayfmt::ArrayFormatError> {
//! let mut format = ArrayFormat::new(NumericKind::Real);
//! assert_eq!(format.fortran(), "(20E15.6)");
//!
//! format.set_fortran("(3F8.2)")?;
//! assert_eq!(format.template(), (3, "{0:8.2F}".to_string()));
//!
//! let mut out = Vec::new();
//! format.write_values(&mut out, &[1.0, 2.5, -3.25, 4.0])?;
//! assert_eq!(String::from_utf8_lossy(&out), "    1.00    2.50   -3.25\n    4.00\n");
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod error;
pub mod format;
pub mod formatting;
pub mod kind;
pub mod writer;

pub use descriptor::Descriptor;
pub use error::{ArrayFormatError, Result};
pub use format::{ArrayFormat, VectorFormat};
pub use formatting::format_real;
pub use kind::{ArrayValue, FormatKind, NumericKind, DEFAULT_VALUES_PER_LINE};
