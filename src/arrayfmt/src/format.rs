// modflowrs-arrayfmt/src/format.rs

//! The array format: one description of how an array is written, viewable
//! as a Fortran descriptor, a per-value template or a vectorized specifier.

use crate::descriptor::Descriptor;
use crate::error::{ArrayFormatError, Result};
use crate::kind::{ArrayValue, FormatKind, NumericKind, DEFAULT_VALUES_PER_LINE};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a numeric array is laid out in a package file.
///
/// Width and decimal places never drop below the numeric kind's defaults
/// through the field setters; an explicit Fortran descriptor may narrow
/// them. Free format always uses the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArrayFormatDef", into = "ArrayFormatDef")]
pub struct ArrayFormat {
    numeric_kind: NumericKind,
    values_per_line: usize,
    format_kind: FormatKind,
    field_width: usize,
    decimal_places: usize,
    free: bool,
    binary: bool,
}

/// Width, decimal places and kind, as taken by a whole-array formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorFormat {
    pub width: usize,
    pub decimal: usize,
    pub kind: FormatKind,
}

impl fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormatKind::Integer => write!(f, "%{}d", self.width),
            kind => write!(f, "%{}.{}{}", self.width, self.decimal, kind),
        }
    }
}

impl Default for ArrayFormat {
    fn default() -> Self {
        ArrayFormat::real()
    }
}

impl ArrayFormat {
    pub fn new(numeric_kind: NumericKind) -> Self {
        ArrayFormat {
            numeric_kind,
            values_per_line: DEFAULT_VALUES_PER_LINE,
            format_kind: numeric_kind.default_format_kind(),
            field_width: numeric_kind.default_width(),
            decimal_places: numeric_kind.default_decimal(),
            free: false,
            binary: false,
        }
    }

    /// `(20E15.6)`
    pub fn real() -> Self {
        ArrayFormat::new(NumericKind::Real)
    }

    /// `(20I10)`
    pub fn integer() -> Self {
        ArrayFormat::new(NumericKind::Integer)
    }

    /// Default format for arrays of `T`.
    pub fn for_value<T: ArrayValue>() -> Self {
        ArrayFormat::new(T::KIND)
    }

    pub fn from_fortran(numeric_kind: NumericKind, descriptor: &str) -> Result<Self> {
        let mut format = ArrayFormat::new(numeric_kind);
        format.set_fortran(descriptor)?;
        Ok(format)
    }

    pub fn numeric_kind(&self) -> NumericKind {
        self.numeric_kind
    }

    pub fn values_per_line(&self) -> usize {
        self.values_per_line
    }

    pub fn format_kind(&self) -> FormatKind {
        self.format_kind
    }

    pub fn field_width(&self) -> usize {
        self.field_width
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn is_free_format(&self) -> bool {
        self.free
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Set every field from a Fortran edit descriptor such as `(20F10.4)`,
    /// `(FREE)` or `(BINARY)`.
    pub fn set_fortran(&mut self, descriptor: &str) -> Result<()> {
        let parsed: Descriptor = descriptor.parse()?;
        self.apply(parsed)
    }

    /// Apply a descriptor, parsed or built by hand. Out of range counts,
    /// widths and decimal places are rejected the same way the parser
    /// rejects them.
    pub fn apply(&mut self, descriptor: Descriptor) -> Result<()> {
        descriptor.validate()?;
        match descriptor {
            Descriptor::Free => self.set_free(true),
            Descriptor::Binary => self.set_binary(true),
            Descriptor::Fixed {
                count,
                kind,
                width,
                decimal,
            } => {
                if !self.numeric_kind.accepts(kind) {
                    return Err(ArrayFormatError::format_error(
                        descriptor.to_string(),
                        format!("{} descriptor cannot write {} arrays", kind, self.numeric_kind),
                    ));
                }
                let floor_width = self.numeric_kind.default_width();
                let floor_decimal = self.numeric_kind.default_decimal();
                if width < floor_width || decimal < floor_decimal {
                    warn!(
                        "{} is narrower than the {} default {}; values may lose precision",
                        descriptor,
                        self.numeric_kind,
                        ArrayFormat::new(self.numeric_kind).fortran()
                    );
                }
                self.values_per_line = count;
                self.format_kind = kind;
                self.field_width = width;
                self.decimal_places = if kind.has_decimal() { decimal } else { 0 };
                self.free = false;
                self.binary = false;
            }
        }
        debug!("Array format set to {}", self.fortran());
        Ok(())
    }

    pub fn set_values_per_line(&mut self, values_per_line: usize) {
        if values_per_line == 0 {
            warn!("Values per line must be positive; using 1");
            self.values_per_line = 1;
        } else {
            self.values_per_line = values_per_line;
        }
    }

    pub fn set_format_kind(&mut self, kind: FormatKind) {
        if !self.numeric_kind.accepts(kind) {
            warn!(
                "{} descriptor cannot write {} arrays; keeping {}",
                kind, self.numeric_kind, self.format_kind
            );
            return;
        }
        self.format_kind = kind;
        if !kind.has_decimal() {
            self.decimal_places = 0;
        }
    }

    pub fn set_field_width(&mut self, width: usize) {
        if self.free {
            warn!("Field width is fixed while the format is free; ignoring {}", width);
            return;
        }
        let floor = self.numeric_kind.default_width();
        let width = if width < floor {
            warn!("Field width {} is below the minimum {}; using {}", width, floor, floor);
            floor
        } else {
            width
        };
        if self.format_kind.has_decimal() && self.decimal_places >= width {
            warn!(
                "Field width {} leaves no room for {} decimal places; keeping {}",
                width, self.decimal_places, self.field_width
            );
            return;
        }
        self.field_width = width;
    }

    pub fn set_decimal_places(&mut self, decimal: usize) {
        if self.free {
            warn!("Decimal places are fixed while the format is free; ignoring {}", decimal);
            return;
        }
        if !self.format_kind.has_decimal() {
            if decimal != 0 {
                warn!("Integer formats have no decimal places; ignoring {}", decimal);
            }
            return;
        }
        let floor = self.numeric_kind.default_decimal();
        let decimal = if decimal < floor {
            warn!("Decimal places {} below the minimum {}; using {}", decimal, floor, floor);
            floor
        } else {
            decimal
        };
        if decimal >= self.field_width {
            warn!(
                "{} decimal places do not fit a field of width {}; keeping {}",
                decimal, self.field_width, self.decimal_places
            );
            return;
        }
        self.decimal_places = decimal;
    }

    /// Switch free format on or off. Switching on resets width and decimal
    /// places to the numeric kind's defaults and clears binary.
    pub fn set_free(&mut self, free: bool) {
        self.free = free;
        if free {
            self.binary = false;
            self.field_width = self.numeric_kind.default_width();
            self.decimal_places = if self.format_kind.has_decimal() {
                self.numeric_kind.default_decimal()
            } else {
                0
            };
        }
    }

    /// Switch binary output on or off. Switching on clears free format.
    pub fn set_binary(&mut self, binary: bool) {
        self.binary = binary;
        if binary {
            self.free = false;
        }
    }

    /// The fixed descriptor, ignoring the free and binary flags.
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::Fixed {
            count: self.values_per_line,
            kind: self.format_kind,
            width: self.field_width,
            decimal: self.decimal_places,
        }
    }

    /// Fortran edit descriptor: `(20E15.6)`, `(FREE)` or `(BINARY)`.
    pub fn fortran(&self) -> String {
        if self.binary {
            Descriptor::Binary.to_string()
        } else if self.free {
            Descriptor::Free.to_string()
        } else {
            self.descriptor().to_string()
        }
    }

    /// Values per line and a per-value template such as `{0:15.6E}`.
    pub fn template(&self) -> (usize, String) {
        let template = match self.format_kind {
            FormatKind::Integer => format!("{{0:{}d}}", self.field_width),
            kind => format!("{{0:{}.{}{}}}", self.field_width, self.decimal_places, kind),
        };
        (self.values_per_line, template)
    }

    pub fn vectorized(&self) -> VectorFormat {
        VectorFormat {
            width: self.field_width,
            decimal: self.decimal_places,
            kind: self.format_kind,
        }
    }

    /// Array control record, e.g. `INTERNAL 1.0 (20E15.6) -1`.
    pub fn control_record(&self, multiplier: f64, iprn: i32) -> String {
        let multiplier = match self.numeric_kind {
            NumericKind::Integer => {
                let rounded = multiplier.round();
                if rounded != multiplier {
                    warn!(
                        "Integer arrays take an integer multiplier; writing {} as {}",
                        multiplier, rounded as i64
                    );
                }
                (rounded as i64).to_string()
            }
            NumericKind::Real => format!("{:?}", multiplier),
        };
        format!("INTERNAL {} {} {}", multiplier, self.fortran(), iprn)
    }
}

impl fmt::Display for ArrayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fortran())
    }
}

#[derive(Serialize, Deserialize)]
struct ArrayFormatDef {
    numeric_kind: NumericKind,
    #[serde(default)]
    values_per_line: Option<usize>,
    #[serde(default)]
    format_kind: Option<FormatKind>,
    #[serde(default)]
    field_width: Option<usize>,
    #[serde(default)]
    decimal_places: Option<usize>,
    #[serde(default)]
    free: bool,
    #[serde(default)]
    binary: bool,
}

impl TryFrom<ArrayFormatDef> for ArrayFormat {
    type Error = ArrayFormatError;

    fn try_from(def: ArrayFormatDef) -> Result<Self> {
        let kind = def.numeric_kind;
        let mut format = ArrayFormat::new(kind);
        let format_kind = def.format_kind.unwrap_or_else(|| kind.default_format_kind());
        let fixed = Descriptor::Fixed {
            count: def.values_per_line.unwrap_or(DEFAULT_VALUES_PER_LINE),
            kind: format_kind,
            width: def.field_width.unwrap_or_else(|| kind.default_width()),
            decimal: if format_kind.has_decimal() {
                def.decimal_places.unwrap_or_else(|| kind.default_decimal())
            } else {
                0
            },
        };
        format.apply(fixed)?;
        if def.free {
            format.set_free(true);
        } else if def.binary {
            format.set_binary(true);
        }
        Ok(format)
    }
}

impl From<ArrayFormat> for ArrayFormatDef {
    fn from(format: ArrayFormat) -> Self {
        ArrayFormatDef {
            numeric_kind: format.numeric_kind,
            values_per_line: Some(format.values_per_line),
            format_kind: Some(format.format_kind),
            field_width: Some(format.field_width),
            decimal_places: Some(format.decimal_places),
            free: format.free,
            binary: format.binary,
        }
    }
}
