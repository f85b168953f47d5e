use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI-from-Go - Generate OpenAPI documentation from annotated Go projects
#[derive(Parser, Debug)]
#[command(name = "openapi-from-go")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Go project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Manifest file whose comments and imports seed the document
    #[arg(short = 'm', long = "manifest", value_name = "FILE", default_value = "swagger.go")]
    pub manifest: PathBuf,

    /// Directory the swagger.json / swagger.yaml file is written into
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", default_value = "json")]
    pub format: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(mut args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    // A bare manifest name is taken relative to the project directory
    if args.manifest.is_relative() {
        args.manifest = args.project_path.join(&args.manifest);
    }
    if !args.manifest.is_file() {
        anyhow::bail!("Manifest file does not exist: {}", args.manifest.display());
    }

    if !args.output_dir.is_dir() {
        anyhow::bail!(
            "Output directory does not exist: {}",
            args.output_dir.display()
        );
    }

    info!("Project path: {}", args.project_path.display());
    info!("Manifest file: {}", args.manifest.display());
    info!("Output directory: {}", args.output_dir.display());
    info!("Output format: {}", args.format);

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting OpenAPI document generation...");

    let written = crate::parse(
        &args.project_path,
        &args.manifest,
        &args.output_dir,
        &args.format,
    )?;

    info!("Generation complete!");
    info!("  - Document: {}", written.display());

    Ok(())
}
