// modflowrs/src/config/tool.rs

use crate::config::array::ArrayConfig;
use crate::constants::DEFAULT_CONFIG_NAME;
use anyhow::Context;
use log::debug;
use modflowrs_options::{packages, OptionsSpec, ParseMode, RepresentationMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tool configuration parsed from modflowrs.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    tolerant: bool,
    mode: Option<RepresentationMode>,
    packages: Vec<OptionsSpec>,
    array: ArrayConfig,
}

impl ToolConfig {
    /// Load the configuration at `path`, or the default file in the current
    /// directory when no path is given. A missing default file yields the
    /// default configuration; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::try_from(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_NAME);
                if default_path.exists() {
                    Self::try_from(default_path)
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn tolerant(&self) -> bool {
        self.tolerant
    }

    pub fn mode(&self) -> Option<RepresentationMode> {
        self.mode
    }

    pub fn packages(&self) -> &[OptionsSpec] {
        &self.packages
    }

    pub fn array(&self) -> &ArrayConfig {
        &self.array
    }

    /// Parse mode after a command line `--tolerant` switch.
    pub fn parse_mode(&self, tolerant: bool) -> ParseMode {
        if tolerant || self.tolerant {
            ParseMode::Tolerant
        } else {
            ParseMode::Strict
        }
    }

    /// Find a package grammar, preferring configured packages over built-ins.
    pub fn resolve_package(&self, name: &str) -> anyhow::Result<OptionsSpec> {
        if let Some(spec) = self
            .packages
            .iter()
            .find(|spec| spec.package().eq_ignore_ascii_case(name.trim()))
        {
            debug!("Using configured grammar for {}", spec.package());
            return Ok(spec.clone());
        }
        packages::lookup(name).with_context(|| {
            let known: Vec<String> = self
                .all_packages()
                .iter()
                .map(|spec| spec.package().to_string())
                .collect();
            format!("Unknown package '{}'. Known packages: {}", name, known.join(", "))
        })
    }

    /// Built-in grammars followed by configured ones; a configured grammar
    /// replaces a built-in of the same name.
    pub fn all_packages(&self) -> Vec<OptionsSpec> {
        let mut specs: Vec<OptionsSpec> = packages::builtin()
            .into_iter()
            .filter(|builtin| {
                !self
                    .packages
                    .iter()
                    .any(|spec| spec.package().eq_ignore_ascii_case(builtin.package()))
            })
            .collect();
        specs.extend(self.packages.iter().cloned());
        specs
    }
}

impl TryFrom<&Path> for ToolConfig {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs_err::read_to_string(path)
            .context(format!("Error reading {} to string.", path.display()))?;

        serde_saphyr::from_str::<ToolConfig>(&content)
            .context(format!("Error parsing YAML file: {}", path.display()))
    }
}

impl TryFrom<&PathBuf> for ToolConfig {
    type Error = anyhow::Error;

    fn try_from(path: &PathBuf) -> anyhow::Result<Self> {
        Self::try_from(path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = "\
tolerant: true
mode: line
packages:
  - package: LAK
    options:
      - name: tableinput
      - name: lakeleakance
        values:
          - name: leakance
            kind: real
  - package: WEL
    options:
      - name: noprint
array:
  values_per_line: 10
";

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_config(CONFIG);
        let config = ToolConfig::try_from(file.path()).unwrap();
        assert!(config.tolerant());
        assert_eq!(config.mode(), Some(RepresentationMode::Line));
        assert_eq!(config.packages().len(), 2);
        assert_eq!(config.array().values_per_line(), Some(10));
        assert_eq!(config.parse_mode(false), ParseMode::Tolerant);
    }

    #[test]
    fn test_resolve_package() {
        let file = write_config(CONFIG);
        let config = ToolConfig::load(Some(file.path())).unwrap();

        let lak = config.resolve_package("lak").unwrap();
        assert_eq!(lak.len(), 2);
        // configured WEL replaces the built-in one
        assert_eq!(config.resolve_package("WEL").unwrap().len(), 1);
        assert_eq!(config.resolve_package("uzf1").unwrap().package(), "UZF");

        let err = config.resolve_package("MNW2").unwrap_err().to_string();
        assert!(err.contains("Unknown package 'MNW2'"));
    }

    #[test]
    fn test_all_packages() {
        let file = write_config(CONFIG);
        let config = ToolConfig::try_from(file.path()).unwrap();
        let names: Vec<String> = config
            .all_packages()
            .iter()
            .map(|spec| spec.package().to_string())
            .collect();
        assert_eq!(names, ["UZF", "SFR", "AG", "LAK", "WEL"]);
    }

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert!(!config.tolerant());
        assert_eq!(config.parse_mode(false), ParseMode::Strict);
        assert_eq!(config.parse_mode(true), ParseMode::Tolerant);
        assert_eq!(config.all_packages().len(), packages::PACKAGE_NAMES.len());
    }

    #[test]
    fn test_invalid_config() {
        let file = write_config(
            "packages:\n  - package: X\n    options:\n      - name: a\n      - name: A\n",
        );
        assert!(ToolConfig::try_from(file.path()).is_err());

        let missing = ToolConfig::load(Some(Path::new("/nonexistent/modflowrs.yml")));
        assert!(missing.is_err());
    }
}
