// modflowrs/src/cli/array.rs

use crate::config::ToolConfig;
use anyhow::Context;
use clap::Args;
use log::info;
use modflowrs_arrayfmt::{ArrayFormat, ArrayValue, NumericKind};
use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Args, Debug, Clone)]
pub struct ArrayArgs {
    /// File of whitespace separated numbers
    pub file: PathBuf,

    /// Fortran edit descriptor for the output, e.g. "(10E15.6)"
    #[arg(short, long)]
    pub format: String,

    /// Values are integers
    #[arg(long)]
    pub integer: bool,

    /// Number of columns; every row starts on a new line
    #[arg(long)]
    pub ncol: Option<usize>,

    /// Multiplier written on the control record
    #[arg(long, default_value_t = 1.0)]
    pub multiplier: f64,

    /// Print flag written on the control record
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub iprn: i32,

    /// Write to this file instead of standard output (required for binary)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn read_values<T>(content: &str, path: &Path) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            // Fortran writes double precision exponents with D
            let token = token.replace(['D', 'd'], "E");
            token.parse::<T>().context(format!(
                "Value {} ('{}') in {} is not a number of the requested kind",
                i + 1,
                token,
                path.display()
            ))
        })
        .collect()
}

fn write_values<T: ArrayValue>(
    format: &ArrayFormat,
    values: Vec<T>,
    ncol: Option<usize>,
) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    match ncol {
        Some(0) => anyhow::bail!("--ncol must be positive"),
        Some(ncol) => {
            if values.len() % ncol != 0 {
                anyhow::bail!(
                    "{} values do not fill rows of {} columns",
                    values.len(),
                    ncol
                );
            }
            let array = Array2::from_shape_vec((values.len() / ncol, ncol), values)?;
            format.write_array(&mut out, array.view())?;
        }
        None => {
            let array = Array1::from(values);
            format.write_array(&mut out, array.view())?;
        }
    }
    Ok(out)
}

/// Rewrite an array in the requested format, preceded by its control record.
pub fn write_array(args: &ArrayArgs, config: &ToolConfig) -> anyhow::Result<String> {
    let kind = if args.integer {
        NumericKind::Integer
    } else {
        NumericKind::Real
    };
    let mut format = ArrayFormat::from_fortran(kind, &args.format)?;
    config.array().apply(&mut format);

    let content = fs_err::read_to_string(&args.file)
        .context(format!("Error reading {} to string.", args.file.display()))?;
    let body = match kind {
        NumericKind::Real => {
            write_values(&format, read_values::<f64>(&content, &args.file)?, args.ncol)?
        }
        NumericKind::Integer => {
            write_values(&format, read_values::<i64>(&content, &args.file)?, args.ncol)?
        }
    };
    let record = format.control_record(args.multiplier, args.iprn);

    match &args.output {
        Some(output) => {
            let mut bytes = if format.is_binary() {
                Vec::new()
            } else {
                format!("{}\n", record).into_bytes()
            };
            bytes.extend_from_slice(&body);
            fs_err::write(output, &bytes)
                .context(format!("Error writing file {}", output.display()))?;
            info!("Wrote {} bytes to {}", bytes.len(), output.display());
            Ok(format!("{}\n", record))
        }
        None => {
            if format.is_binary() {
                anyhow::bail!("Binary arrays need an --output file");
            }
            Ok(format!("{}\n{}", record, String::from_utf8_lossy(&body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn data_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(file: &NamedTempFile, format: &str) -> ArrayArgs {
        ArrayArgs {
            file: file.path().to_path_buf(),
            format: format.to_string(),
            integer: false,
            ncol: None,
            multiplier: 1.0,
            iprn: -1,
            output: None,
        }
    }

    #[test]
    fn test_fixed_rows() {
        let file = data_file("1.0 2.0 3.0\n4.0 5.0 6.0\n");
        let mut args = args(&file, "(2F8.2)");
        args.ncol = Some(3);
        assert_eq!(
            write_array(&args, &ToolConfig::default()).unwrap(),
            "INTERNAL 1.0 (2F8.2) -1\n    1.00    2.00\n    3.00\n    4.00    5.00\n    6.00\n"
        );
    }

    #[test]
    fn test_double_exponents_and_integers() {
        let reals = data_file("1.5D+00 2.0d-1\n");
        let out = write_array(&args(&reals, "(FREE)"), &ToolConfig::default()).unwrap();
        assert_eq!(out, "INTERNAL 1.0 (FREE) -1\n1.500000E+00 2.000000E-01\n");

        let integers = data_file("1 0 -1\n");
        let mut args = args(&integers, "(10I3)");
        args.integer = true;
        let out = write_array(&args, &ToolConfig::default()).unwrap();
        assert_eq!(out, "INTERNAL 1 (10I3) -1\n  1  0 -1\n");
    }

    #[test]
    fn test_bad_input() {
        let file = data_file("1 2 x\n");
        let mut bad_value = args(&file, "(FREE)");
        bad_value.integer = true;
        assert!(write_array(&bad_value, &ToolConfig::default()).is_err());

        let file = data_file("1 2 3\n");
        let mut bad_shape = args(&file, "(FREE)");
        bad_shape.ncol = Some(2);
        assert!(write_array(&bad_shape, &ToolConfig::default()).is_err());
    }

    #[test]
    fn test_binary_output() {
        let file = data_file("1 2\n");
        let mut args = args(&file, "(BINARY)");
        args.integer = true;
        assert!(write_array(&args, &ToolConfig::default()).is_err());

        let dir = tempdir().unwrap();
        let output = dir.path().join("ibound.bin");
        args.output = Some(output.clone());
        let record = write_array(&args, &ToolConfig::default()).unwrap();
        assert_eq!(record, "INTERNAL 1 (BINARY) -1\n");
        let bytes = fs_err::read(&output).unwrap();
        assert_eq!(bytes, [1i32.to_le_bytes(), 2i32.to_le_bytes()].concat());
    }
}
