// modflowrs/src/cli/options.rs

use crate::config::ToolConfig;
use anyhow::Context;
use clap::Args;
use log::info;
use modflowrs_options::{split_options, OptionBlock, OptionValue, RepresentationMode};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct OptionsArgs {
    /// Package input file
    pub file: PathBuf,

    /// Package whose option grammar applies (UZF, SFR, WEL, AG or a configured one)
    #[arg(short, long)]
    pub package: String,

    /// Render as an OPTIONS block or a single option line
    #[arg(short, long)]
    pub mode: Option<RepresentationMode>,

    /// Keep unknown options instead of failing
    #[arg(long)]
    pub tolerant: bool,

    /// Print the options as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct OptionEntry<'a> {
    name: &'a str,
    values: &'a [OptionValue],
}

#[derive(Serialize)]
struct OptionsReport<'a> {
    package: &'a str,
    mode: RepresentationMode,
    options: Vec<OptionEntry<'a>>,
    unrecognized: &'a [String],
}

impl<'a> From<&'a OptionBlock> for OptionsReport<'a> {
    fn from(block: &'a OptionBlock) -> Self {
        OptionsReport {
            package: block.package(),
            mode: block.mode(),
            options: block
                .enabled()
                .map(|(name, values)| OptionEntry { name, values })
                .collect(),
            unrecognized: block.unrecognized(),
        }
    }
}

/// Read the options at the top of a package file and render them again.
pub fn show_options(args: &OptionsArgs, config: &ToolConfig) -> anyhow::Result<String> {
    let spec = config.resolve_package(&args.package)?;
    let content = fs_err::read_to_string(&args.file)
        .context(format!("Error reading {} to string.", args.file.display()))?;

    let (block, _rest) = split_options(&content, &spec, config.parse_mode(args.tolerant))
        .context(format!(
            "Error parsing {} options in {}",
            spec.package(),
            args.file.display()
        ))?;
    let mut block = match block {
        Some(block) => block,
        None => anyhow::bail!(
            "{} has no option block or option line for {}",
            args.file.display(),
            spec.package()
        ),
    };
    info!(
        "Read {} {} options from {}",
        block.enabled_count(),
        spec.package(),
        args.file.display()
    );

    if let Some(mode) = args.mode.or(config.mode()) {
        block.set_mode(mode);
    }

    if args.json {
        let report = OptionsReport::from(&block);
        Ok(serde_json::to_string_pretty(&report)? + "\n")
    } else {
        Ok(block.render() + "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn package_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(file: &NamedTempFile, package: &str) -> OptionsArgs {
        OptionsArgs {
            file: file.path().to_path_buf(),
            package: package.to_string(),
            mode: None,
            tolerant: false,
            json: false,
        }
    }

    #[test]
    fn test_block_to_line() {
        let file = package_file("OPTIONS\nNOSURFLEAK\nETSQUARE 0.2\nSAVEFINF\nEND\n 3 1 0 0\n");
        let mut args = args(&file, "uzf");
        let config = ToolConfig::default();
        assert_eq!(
            show_options(&args, &config).unwrap(),
            "OPTIONS\nNOSURFLEAK\nETSQUARE 0.2\nSAVEFINF\nEND\n"
        );

        args.mode = Some(RepresentationMode::Line);
        assert_eq!(
            show_options(&args, &config).unwrap(),
            "NOSURFLEAK ETSQUARE 0.2 SAVEFINF\n"
        );
    }

    #[test]
    fn test_json_report() {
        let file = package_file("specify 0.1 20 noprint\n 10 50\n");
        let mut args = args(&file, "WEL");
        args.json = true;
        let out = show_options(&args, &ToolConfig::default()).unwrap();
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["package"], "WEL");
        assert_eq!(report["mode"], "line");
        assert_eq!(report["options"][0]["name"], "noprint");
        assert_eq!(report["options"][1]["name"], "specify");
        assert_eq!(report["options"][1]["values"][0], 0.1);
        assert_eq!(report["options"][1]["values"][1], 20);
    }

    #[test]
    fn test_tolerant_keeps_unknown() {
        let file = package_file("OPTIONS\nNOPRINT\nFUTURE_OPTION 3\nEND\n");
        let mut args = args(&file, "AG");
        assert!(show_options(&args, &ToolConfig::default()).is_err());

        args.tolerant = true;
        assert_eq!(
            show_options(&args, &ToolConfig::default()).unwrap(),
            "OPTIONS\nNOPRINT\nFUTURE_OPTION 3\nEND\n"
        );
    }

    #[test]
    fn test_no_options() {
        let file = package_file("  10  50  0\n");
        let err = show_options(&args(&file, "wel"), &ToolConfig::default()).unwrap_err();
        assert!(err.to_string().contains("has no option block or option line for WEL"));
    }
}
