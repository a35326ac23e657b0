// modflowrs/src/cli/format.rs

use crate::config::ToolConfig;
use clap::Args;
use modflowrs_arrayfmt::{ArrayFormat, NumericKind};

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Fortran edit descriptor, e.g. "(20F10.4)" or "(FREE)"
    pub descriptor: String,

    /// Describe an integer array format
    #[arg(long)]
    pub integer: bool,
}

impl FormatArgs {
    pub fn numeric_kind(&self) -> NumericKind {
        if self.integer {
            NumericKind::Integer
        } else {
            NumericKind::Real
        }
    }
}

/// Show every view of an array format.
pub fn describe_format(args: &FormatArgs, config: &ToolConfig) -> anyhow::Result<String> {
    let mut format = ArrayFormat::from_fortran(args.numeric_kind(), &args.descriptor)?;
    config.array().apply(&mut format);

    let (values_per_line, template) = format.template();
    let mut out = String::new();
    out.push_str(&format!("kind:       {}\n", format.numeric_kind()));
    out.push_str(&format!("fortran:    {}\n", format.fortran()));
    out.push_str(&format!(
        "template:   {} per line, {}\n",
        values_per_line, template
    ));
    out.push_str(&format!("vectorized: {}\n", format.vectorized()));
    out.push_str(&format!("control:    {}\n", format.control_record(1.0, -1)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_fixed() {
        let args = FormatArgs {
            descriptor: "(20f10.4)".to_string(),
            integer: false,
        };
        let out = describe_format(&args, &ToolConfig::default()).unwrap();
        assert_eq!(
            out,
            "kind:       real\n\
             fortran:    (20F10.4)\n\
             template:   20 per line, {0:10.4F}\n\
             vectorized: %10.4F\n\
             control:    INTERNAL 1.0 (20F10.4) -1\n"
        );
    }

    #[test]
    fn test_describe_integer_free() {
        let args = FormatArgs {
            descriptor: "(FREE)".to_string(),
            integer: true,
        };
        let out = describe_format(&args, &ToolConfig::default()).unwrap();
        assert!(out.contains("template:   20 per line, {0:10d}\n"));
        assert!(out.contains("control:    INTERNAL 1 (FREE) -1\n"));
    }

    #[test]
    fn test_wrong_kind_is_an_error() {
        let args = FormatArgs {
            descriptor: "(10I5)".to_string(),
            integer: false,
        };
        let err = describe_format(&args, &ToolConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }
}
