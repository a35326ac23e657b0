// modflowrs-arrayfmt/src/writer.rs

//! Writing whole arrays in an [`ArrayFormat`].

use crate::error::{ArrayFormatError, Result};
use crate::format::ArrayFormat;
use crate::kind::ArrayValue;
use log::debug;
use ndarray::{ArrayView, ArrayView1, Dimension};
use std::io::Write;

impl ArrayFormat {
    fn check_kind<T: ArrayValue>(&self) -> Result<()> {
        if T::KIND != self.numeric_kind() {
            return Err(ArrayFormatError::KindMismatch {
                expected: self.numeric_kind(),
                found: T::KIND,
            });
        }
        Ok(())
    }

    /// Write a slice as a one-dimensional array.
    pub fn write_values<T: ArrayValue, W: Write>(&self, writer: &mut W, values: &[T]) -> Result<()> {
        self.write_array(writer, ArrayView1::from(values))
    }

    /// Write an array in row-major order.
    ///
    /// Text output puts `values_per_line` values on each line and starts
    /// every row of the last axis on a new line. Binary formats write the
    /// raw values instead.
    pub fn write_array<T, D, W>(&self, writer: &mut W, array: ArrayView<'_, T, D>) -> Result<()>
    where
        T: ArrayValue,
        D: Dimension,
        W: Write,
    {
        self.check_kind::<T>()?;
        if self.is_binary() {
            return self.write_binary(writer, array);
        }
        debug!(
            "Writing {} values with shape {:?} as {}",
            array.len(),
            array.shape(),
            self.fortran()
        );
        let separator = if self.is_free_format() { " " } else { "" };
        for row in array.rows() {
            let row: Vec<T> = row.iter().copied().collect();
            for chunk in row.chunks(self.values_per_line()) {
                let line: Vec<String> = chunk.iter().map(|v| self.format_value(*v)).collect();
                writeln!(writer, "{}", line.join(separator))?;
            }
        }
        Ok(())
    }

    /// Write the raw values: little-endian `f32` for reals, `i32` for integers.
    pub fn write_binary<T, D, W>(&self, writer: &mut W, array: ArrayView<'_, T, D>) -> Result<()>
    where
        T: ArrayValue,
        D: Dimension,
        W: Write,
    {
        self.check_kind::<T>()?;
        for value in array.iter() {
            value.write_binary(writer)?;
        }
        Ok(())
    }

    /// Render an array as text.
    pub fn to_text<T, D>(&self, array: ArrayView<'_, T, D>) -> Result<String>
    where
        T: ArrayValue,
        D: Dimension,
    {
        if self.is_binary() {
            return Err(ArrayFormatError::format_error(
                self.fortran(),
                "binary arrays have no text form".to_string(),
            ));
        }
        let mut out = Vec::new();
        self.write_array(&mut out, array)?;
        // Only format_value output reaches the buffer, which is always UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NumericKind;
    use ndarray::{arr2, Array1, Array3};

    #[test]
    fn test_wraps_at_values_per_line() {
        let format = ArrayFormat::from_fortran(NumericKind::Integer, "(3I4)").unwrap();
        let values: Vec<i32> = (1..=7).collect();
        let mut out = Vec::new();
        format.write_values(&mut out, &values).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "   1   2   3\n   4   5   6\n   7\n"
        );
    }

    #[test]
    fn test_rows_start_new_lines() {
        let format = ArrayFormat::from_fortran(NumericKind::Real, "(10F6.1)").unwrap();
        let array = arr2(&[[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(
            format.to_text(array.view()).unwrap(),
            "   1.0   2.0   3.0\n   4.0   5.0   6.0\n"
        );
    }

    #[test]
    fn test_free_format_uses_spaces() {
        let format = ArrayFormat::from_fortran(NumericKind::Integer, "(FREE)").unwrap();
        let array = Array1::from(vec![1i64, -20, 300]);
        assert_eq!(format.to_text(array.view()).unwrap(), "1 -20 300\n");
    }

    #[test]
    fn test_three_dimensional() {
        let format = ArrayFormat::from_fortran(NumericKind::Integer, "(FREE)").unwrap();
        let array = Array3::<i32>::from_shape_fn((2, 2, 2), |(k, i, j)| (k * 4 + i * 2 + j) as i32);
        assert_eq!(format.to_text(array.view()).unwrap(), "0 1\n2 3\n4 5\n6 7\n");
    }

    #[test]
    fn test_empty_array() {
        let format = ArrayFormat::real();
        let values: Vec<f64> = Vec::new();
        let mut out = Vec::new();
        format.write_values(&mut out, &values).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_kind_mismatch() {
        let format = ArrayFormat::integer();
        let mut out = Vec::new();
        let err = format.write_values(&mut out, &[1.0f64]).unwrap_err();
        assert!(matches!(
            err,
            ArrayFormatError::KindMismatch {
                expected: NumericKind::Integer,
                found: NumericKind::Real
            }
        ));
    }

    #[test]
    fn test_binary() {
        let format = ArrayFormat::from_fortran(NumericKind::Real, "(BINARY)").unwrap();
        let mut out = Vec::new();
        format.write_values(&mut out, &[1.0f64, 2.5]).unwrap();
        let mut expected = 1.0f32.to_le_bytes().to_vec();
        expected.extend_from_slice(&2.5f32.to_le_bytes());
        assert_eq!(out, expected);

        let array = Array1::from(vec![1.0f32]);
        assert!(format.to_text(array.view()).is_err());
    }

    #[test]
    fn test_binary_integer_overflow_is_an_error() {
        let format = ArrayFormat::from_fortran(NumericKind::Integer, "(BINARY)").unwrap();
        let mut out = Vec::new();
        let err = format.write_values(&mut out, &[5_000_000_000i64]).unwrap_err();
        assert!(matches!(err, ArrayFormatError::Io(_)));
    }
}
