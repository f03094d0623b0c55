// ==========================================
// gSSURGO Merge - Command Line Entry
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gssurgo_merge::config::{default_workspace_dir, ConversionOptions};
use gssurgo_merge::domain::types::Region;
use gssurgo_merge::engine::ConversionOrchestrator;
use gssurgo_merge::logging;

/// Merge SSURGO soil survey downloads into one consolidated store.
#[derive(Parser, Debug)]
#[command(name = "gssurgo-merge", version, about)]
struct Cli {
    /// Folder containing the soil_<areasymbol> survey datasets
    #[arg(long)]
    input_folder: PathBuf,

    /// Survey dataset folder names to merge (default: every soil_* folder)
    #[arg(long = "survey")]
    surveys: Vec<String>,

    /// Survey boundary layer that pre-determines the merge order
    #[arg(long)]
    boundary_layer: Option<PathBuf>,

    /// Output store path (default: <workspace>/gSSURGO.sqlite)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Geographic region, e.g. "Lower 48 States", "Alaska", "World"
    #[arg(long, default_value = "Lower 48 States")]
    region: String,

    /// Featureclass identifier appended to layer display aliases
    #[arg(long, default_value = "")]
    alias: String,

    /// Read tabular data from template databases instead of text files
    #[arg(long)]
    use_database: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let options = ConversionOptions {
        input_folder: cli.input_folder,
        surveys: if cli.surveys.is_empty() {
            None
        } else {
            Some(cli.surveys)
        },
        boundary_layer: cli.boundary_layer,
        output_path: cli
            .output
            .unwrap_or_else(|| default_workspace_dir().join("gSSURGO.sqlite")),
        region: Region::parse(&cli.region),
        alias_suffix: cli.alias,
        use_text_files: !cli.use_database,
    };

    let orchestrator = match ConversionOrchestrator::new(options) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match orchestrator.run() {
        Ok(result) => {
            match result.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: {e}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("conversion failed: {e}");
            ExitCode::FAILURE
        }
    }
}
