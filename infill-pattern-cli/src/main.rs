//! infill-pattern - service adapter for infill pattern generation
//!
//! Usage:
//!   infill-pattern generate [request.json] [-o response.json]
//!   infill-pattern preview [request.json] [-o preview.svg]
//!   infill-pattern patterns
//!
//! Requests are read from stdin when no file (or `-`) is given.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use cli::{cmd_generate, cmd_patterns, cmd_preview};

/// Generate dense-line infill for slicer outlines
#[derive(Parser, Debug)]
#[command(name = "infill-pattern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a JSON infill request with a JSON response
    Generate {
        /// Request file ('-' or omitted for stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Response file (stdout if omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render a request's outlines and infill lines as SVG
    Preview {
        /// Request file ('-' or omitted for stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// SVG file (stdout if omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// List available patterns
    Patterns,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Generate { input, output } => {
            if cmd_generate(input.as_deref(), output.as_deref())? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Preview { input, output } => {
            cmd_preview(input.as_deref(), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Patterns => {
            cmd_patterns();
            Ok(ExitCode::SUCCESS)
        }
    }
}
