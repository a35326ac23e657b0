// modflowrs/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use modflowrs::cli::{
    describe_format, list_packages, show_options, write_array, ArrayArgs, FormatArgs, OptionsArgs,
};
use modflowrs::ToolConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "modflowrs")]
#[command(about = "Option blocks and array formats for MODFLOW-NWT package files", long_about = None)]
#[command(version = env!("MODFLOWRS_CLI_VERSION"))]
struct Cli {
    /// Configuration file (defaults to modflowrs.yml when present)
    #[arg(short, long, value_name = "FILE", global = true, env = "MODFLOWRS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and re-render the options at the top of a package file
    Options(OptionsArgs),
    /// Show the views of a Fortran array format
    Format(FormatArgs),
    /// Rewrite an array of numbers in a Fortran format
    Array(ArrayArgs),
    /// List the known package option grammars
    Packages,
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = ToolConfig::load(cli.config.as_deref())?;

    let output = match &cli.command {
        Commands::Options(args) => show_options(args, &config)?,
        Commands::Format(args) => describe_format(args, &config)?,
        Commands::Array(args) => write_array(args, &config)?,
        Commands::Packages => list_packages(&config),
    };
    print!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
