// modflowrs-arrayfmt/src/formatting.rs

//! Output logic for single array values.

use crate::format::ArrayFormat;
use crate::kind::{ArrayValue, FormatKind};
use log::warn;

impl ArrayFormat {
    /// Format one value with this format's edit descriptor.
    ///
    /// Fixed formats right-align the value in `field_width` columns; free
    /// format returns the bare value. Output wider than the field is kept
    /// as is.
    pub fn format_value<T: ArrayValue>(&self, value: T) -> String {
        let text = match self.format_kind() {
            FormatKind::Integer => value.to_i64().to_string(),
            kind => format_real(value.to_f64(), kind, self.decimal_places()),
        };
        if self.is_free_format() {
            text
        } else {
            fit(text, self.field_width())
        }
    }
}

/// Format a real without padding.
pub fn format_real(value: f64, kind: FormatKind, decimal: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    match kind {
        FormatKind::Fixed => format!("{:.*}", decimal, value),
        FormatKind::Exponential => exponential(value, decimal, 'E'),
        FormatKind::Double => exponential(value, decimal, 'D'),
        FormatKind::General => general(value, decimal),
        FormatKind::Integer => format!("{}", value.round() as i64),
    }
}

fn split_exponent(text: &str) -> (&str, i32) {
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn exponent_suffix(marker: char, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{}{:02}", marker, sign, exponent.abs())
}

fn exponential(value: f64, decimal: usize, marker: char) -> String {
    let text = format!("{:.*e}", decimal, value);
    let (mantissa, exponent) = split_exponent(&text);
    format!("{}{}", mantissa, exponent_suffix(marker, exponent))
}

fn strip_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

// `decimal` is the number of significant digits, as for Python's `G`
fn general(value: f64, decimal: usize) -> String {
    let precision = decimal.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = split_exponent(&scientific);
    if exponent < -4 || exponent >= precision as i32 {
        format!("{}{}", strip_zeros(mantissa), exponent_suffix('E', exponent))
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn fit(text: String, width: usize) -> String {
    if text.len() > width {
        warn!(
            "Value {} does not fit in a field of width {}; writing it unpadded",
            text, width
        );
        text
    } else {
        format!("{:>width$}", text, width = width)
    }
}
