// modflowrs-options/src/error.rs

//! Error types for option specs and option blocks.

use crate::spec::ValueKind;
use thiserror::Error;

/// Result type alias for option block operations.
pub type Result<T> = std::result::Result<T, OptionBlockError>;

/// Errors raised while parsing, rendering or editing an option block.
///
/// These are reported to the owning package, which decides whether to abort
/// the load or fall back to a default block.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionBlockError {
    /// The text does not follow the block or line grammar
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The option name is not part of the package's spec
    #[error("Unknown option '{name}' for package {package}")]
    UnknownOption { package: String, name: String },

    /// A sub-value cannot be coerced to the declared kind
    #[error("Invalid value '{value}' for option '{option}'. Expected type: {expected}")]
    TypeMismatch {
        option: String,
        value: String,
        expected: ValueKind,
    },

    /// Wrong number of sub-values supplied programmatically
    #[error("Option '{option}' expects {expected}, got {found}")]
    Arity {
        option: String,
        expected: String,
        found: usize,
    },

    /// Re-enabling a valued option that never had values
    #[error("Option '{option}' has no cached values to enable")]
    MissingValues { option: String },
}

impl OptionBlockError {
    pub fn parse_error<S: Into<String>>(message: S, line: usize) -> Self {
        OptionBlockError::Parse {
            message: message.into(),
            line,
        }
    }

    pub fn unknown_option<S: Into<String>>(package: S, name: S) -> Self {
        OptionBlockError::UnknownOption {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn type_mismatch<S: Into<String>>(option: S, value: S, expected: ValueKind) -> Self {
        OptionBlockError::TypeMismatch {
            option: option.into(),
            value: value.into(),
            expected,
        }
    }

    /// Short category name, handy for log records.
    pub fn category(&self) -> &'static str {
        match self {
            OptionBlockError::Parse { .. } => "parse",
            OptionBlockError::UnknownOption { .. } => "unknown_option",
            OptionBlockError::TypeMismatch { .. } => "type_mismatch",
            OptionBlockError::Arity { .. } => "arity",
            OptionBlockError::MissingValues { .. } => "missing_values",
        }
    }
}

/// Errors raised while building an options spec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Option '{name}' is declared more than once for package {package}")]
    DuplicateName { package: String, name: String },

    #[error("Package {package} declares an option with an empty name")]
    EmptyName { package: String },

    #[error("Option '{name}' cannot declare both fixed and variadic values")]
    ConflictingArity { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OptionBlockError::parse_error("missing END", 4);
        assert_eq!(err.to_string(), "Parse error at line 4: missing END");
        assert_eq!(err.category(), "parse");

        let err = OptionBlockError::type_mismatch("etsquare", "abc", ValueKind::Real);
        assert_eq!(
            err.to_string(),
            "Invalid value 'abc' for option 'etsquare'. Expected type: real"
        );
    }
}
