//! OpenAPI-from-Go - Command-line tool for generating OpenAPI documentation.
//!
//! This binary generates an OpenAPI 3.0 document from an annotated Go
//! project by static analysis: no compiler run, no program execution. The
//! manifest file's comments provide the document-level metadata and its
//! imports enumerate the packages to scan.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-go [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Generate swagger.json next to the project:
//! ```bash
//! openapi-from-go ./my-api-project -o ./docs
//! ```
//!
//! Generate YAML with an explicit manifest:
//! ```bash
//! openapi-from-go ./my-api-project -m cmd/api/swagger.go -f yaml -o ./docs
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-from-go ./my-api-project -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_go::cli;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI-from-Go starting...");

    // Now do the full validation pass
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
