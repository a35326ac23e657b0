// modflowrs/src/config/array.rs

use modflowrs_arrayfmt::ArrayFormat;
use serde::{Deserialize, Serialize};

/// Overrides applied to every array format the tool builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    values_per_line: Option<usize>,
}

impl ArrayConfig {
    pub fn values_per_line(&self) -> Option<usize> {
        self.values_per_line
    }

    /// Apply the overrides to a free format. Fixed descriptors carry their
    /// own repeat count, which wins.
    pub fn apply(&self, format: &mut ArrayFormat) {
        if !format.is_free_format() {
            return;
        }
        if let Some(values_per_line) = self.values_per_line {
            format.set_values_per_line(values_per_line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modflowrs_arrayfmt::NumericKind;

    #[test]
    fn test_applies_to_free_format_only() {
        let config: ArrayConfig = serde_json::from_str(r#"{"values_per_line": 8}"#).unwrap();

        let mut free = ArrayFormat::from_fortran(NumericKind::Real, "(FREE)").unwrap();
        config.apply(&mut free);
        assert_eq!(free.values_per_line(), 8);

        let mut fixed = ArrayFormat::from_fortran(NumericKind::Real, "(5F10.3)").unwrap();
        config.apply(&mut fixed);
        assert_eq!(fixed.values_per_line(), 5);
    }
}
